// src/records/mod.rs

//! Job, step and parameter records.
//!
//! Responsibilities:
//! - Define the [`RecordSource`] seam the assembler reads from.
//! - Define the TOML-backed record file model (`model.rs`).
//! - Load a record file from disk (`loader.rs`).
//! - Validate record identities and file names (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

use anyhow::Result;

use crate::types::{Job, Param, Step};

pub use loader::{TomlRecordSource, load_and_validate, load_from_path};
pub use model::{RawRecordFile, RecordFile};

/// Anything that can list the job catalog.
///
/// The assembler only needs the three flat record lists; a database-backed
/// implementation can replace the record file without touching assembly.
pub trait RecordSource {
    fn list_jobs(&self) -> Result<Vec<Job>>;
    fn list_steps(&self) -> Result<Vec<Step>>;
    fn list_params(&self) -> Result<Vec<Param>>;
}

/// In-memory record source.
#[derive(Debug, Clone, Default)]
pub struct StaticRecordSource {
    pub jobs: Vec<Job>,
    pub steps: Vec<Step>,
    pub params: Vec<Param>,
}

impl StaticRecordSource {
    pub fn new(jobs: Vec<Job>, steps: Vec<Step>, params: Vec<Param>) -> Self {
        Self { jobs, steps, params }
    }
}

impl RecordSource for StaticRecordSource {
    fn list_jobs(&self) -> Result<Vec<Job>> {
        Ok(self.jobs.clone())
    }

    fn list_steps(&self) -> Result<Vec<Step>> {
        Ok(self.steps.clone())
    }

    fn list_params(&self) -> Result<Vec<Param>> {
        Ok(self.params.clone())
    }
}
