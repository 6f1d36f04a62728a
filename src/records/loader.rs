// src/records/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::errors::Result;
use crate::records::RecordSource;
use crate::records::model::{RawRecordFile, RecordFile};
use crate::types::{Job, Param, Step};

/// Load a record file from a given path and return the raw `RawRecordFile`.
///
/// This only performs TOML deserialization. Use [`load_and_validate`] for the
/// id and file name checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawRecordFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let records: RawRecordFile = toml::from_str(&contents)?;

    Ok(records)
}

/// Load a record file from path and run validation.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<RecordFile> {
    let raw = load_from_path(&path)?;
    let records = RecordFile::try_from(raw)?;
    debug!(
        path = ?path.as_ref(),
        jobs = records.jobs().len(),
        steps = records.steps().len(),
        params = records.params().len(),
        "loaded record file"
    );
    Ok(records)
}

/// [`RecordSource`] backed by a TOML record file.
#[derive(Debug, Clone)]
pub struct TomlRecordSource {
    records: RecordFile,
}

impl TomlRecordSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            records: load_and_validate(path)?,
        })
    }
}

impl From<RecordFile> for TomlRecordSource {
    fn from(records: RecordFile) -> Self {
        Self { records }
    }
}

impl RecordSource for TomlRecordSource {
    fn list_jobs(&self) -> anyhow::Result<Vec<Job>> {
        Ok(self.records.jobs().to_vec())
    }

    fn list_steps(&self) -> anyhow::Result<Vec<Step>> {
        Ok(self.records.steps().to_vec())
    }

    fn list_params(&self) -> anyhow::Result<Vec<Param>> {
        Ok(self.records.params().to_vec())
    }
}
