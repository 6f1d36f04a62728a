// src/render/script.rs

//! Driver script generation.
//!
//! ```text
//! # This file is generated by WBTEQ at 2024-05-01 08:30:00.000000
//! cat < j1_s1.bteq >> Job_1_20240501_083000.log
//! cat < j1_s2.bteq >> Job_1_20240501_083000.log
//! ```
//!
//! Paths inside the script are bare file names: the runner executes it with
//! the working folder as current directory. Every step appends to the same
//! log so a multi-step job keeps the output of all of its steps.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::fs::FileSystem;
use crate::render::RenderedStep;
use crate::render::stamp::GenerationStamp;
use crate::types::JobDefinition;

/// A driver script written to the working folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverScript {
    pub job_name: String,
    /// File name of the script, relative to the working folder.
    pub script_name: String,
    pub log_name: String,
    pub path: PathBuf,
}

pub fn script_file_name(job: &JobDefinition, stamp: &GenerationStamp) -> String {
    format!("{}_{}.sh", job.file_prefix(), stamp.file_suffix())
}

pub fn log_file_name(job: &JobDefinition, stamp: &GenerationStamp) -> String {
    format!("{}_{}.log", job.file_prefix(), stamp.file_suffix())
}

/// Script text: provenance comment, then one `cat` line per rendered step
/// in the order given.
pub fn driver_script_body(steps: &[RenderedStep], log_name: &str, stamp: &GenerationStamp) -> String {
    let mut body = format!("# This file is generated by WBTEQ at {stamp}\n");
    for step in steps {
        body.push_str(&format!("cat < {} >> {}\n", step.filename, log_name));
    }
    body
}

/// Write the driver script for `job` into `work` and mark it executable.
pub fn write_driver_script(
    fs: &dyn FileSystem,
    job: &JobDefinition,
    steps: &[RenderedStep],
    work: &Path,
    stamp: &GenerationStamp,
) -> Result<DriverScript> {
    let script_name = script_file_name(job, stamp);
    let log_name = log_file_name(job, stamp);
    let path = work.join(&script_name);

    fs.write(&path, driver_script_body(steps, &log_name, stamp).as_bytes())?;
    fs.set_executable(&path)?;

    Ok(DriverScript {
        job_name: job.job_name.clone(),
        script_name,
        log_name,
        path,
    })
}
