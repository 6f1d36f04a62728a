// src/render/stamp.rs

//! Generation timestamps.

use std::fmt;

use chrono::{Local, NaiveDateTime};

/// Time source, injectable so generated names are deterministic in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// The single instant shared by every artifact of one job: rendered template
/// headers, the driver script header and the driver/log file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationStamp(NaiveDateTime);

impl GenerationStamp {
    pub fn new(at: NaiveDateTime) -> Self {
        Self(at)
    }

    pub fn capture(clock: &dyn Clock) -> Self {
        Self(clock.now())
    }

    /// Compact form used in file names, e.g. `20240131_235959`.
    pub fn file_suffix(&self) -> String {
        self.0.format("%Y%m%d_%H%M%S").to_string()
    }
}

impl fmt::Display for GenerationStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S%.6f"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn suffix_and_display_formats() {
        let at = NaiveDate::from_ymd_opt(2024, 1, 31)
            .and_then(|d| d.and_hms_micro_opt(23, 59, 5, 42))
            .unwrap();
        let stamp = GenerationStamp::new(at);
        assert_eq!(stamp.file_suffix(), "20240131_235905");
        assert_eq!(stamp.to_string(), "2024-01-31 23:59:05.000042");
    }
}
