// src/assemble/validate.rs

use std::path::Path;

use tracing::debug;

use crate::fs::FileSystem;
use crate::types::{JobDefinition, RejectReason};

/// Check that every template the job needs is a regular file in `library`.
///
/// Stops at the first missing file. A job with no steps is never valid.
pub fn check_job_files(
    job: &JobDefinition,
    fs: &dyn FileSystem,
    library: &Path,
) -> Result<(), RejectReason> {
    if job.steps.is_empty() {
        return Err(RejectReason::NoSteps);
    }

    for filename in job.filenames() {
        let path = library.join(filename);
        debug!(job = %job.job_name, path = ?path, "check template");
        if !fs.is_file(&path) {
            return Err(RejectReason::FileNotFound {
                filename: filename.to_string(),
            });
        }
    }
    Ok(())
}
