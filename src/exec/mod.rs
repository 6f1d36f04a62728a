// src/exec/mod.rs

//! Driver script execution.
//!
//! - [`backend`] provides the `ScriptRunner` trait and the `ProcessRunner`
//!   used in production, which tests replace with a fake.
//! - [`run_scripts`] runs generated scripts one after another, in the order
//!   their jobs were assembled.

pub mod backend;

use std::path::{Path, PathBuf};

use tracing::error;

use crate::observe::{PipelineEvent, PipelineObserver};
use crate::pipeline::GeneratedJob;
use crate::types::ScriptOutcome;

pub use backend::{ProcessRunner, ScriptRunner};

/// Result of running one job's driver script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRun {
    pub job_name: String,
    pub script: PathBuf,
    pub outcome: ScriptOutcome,
}

/// Run each job's driver script sequentially, waiting for each to exit.
///
/// A script that cannot be started counts as `Failed(-1)`; the remaining
/// scripts still run.
pub async fn run_scripts(
    runner: &mut dyn ScriptRunner,
    jobs: &[GeneratedJob],
    work_dir: &Path,
    observer: &dyn PipelineObserver,
) -> Vec<ScriptRun> {
    let mut runs = Vec::with_capacity(jobs.len());

    for job in jobs {
        let outcome = match runner.run_script(&job.script, work_dir).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(
                    job = %job.job_name,
                    script = ?job.script.path,
                    error = %err,
                    "driver script execution error"
                );
                ScriptOutcome::Failed(-1)
            }
        };

        observer.observe(&PipelineEvent::ScriptFinished {
            job: job.job_name.clone(),
            path: job.script.path.clone(),
            outcome,
        });
        runs.push(ScriptRun {
            job_name: job.job_name.clone(),
            script: job.script.path.clone(),
            outcome,
        });
    }

    runs
}
