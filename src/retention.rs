// src/retention.rs

//! Clean-up of old logs and scripts in the working folder.

use std::path::Path;

use tracing::info;

/// Retention window for generated artifacts.
///
/// Only announces what it would delete; nothing is removed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Retention {
    pub days: u32,
}

impl Retention {
    pub fn new(days: u32) -> Self {
        Self { days }
    }

    pub fn apply(&self, folder: &Path) {
        info!(folder = ?folder, days = self.days, "delete old logs/scripts older than retention window");
    }
}
