// src/pipeline.rs

//! Per-job generation: render every step, then write the driver script.
//!
//! Jobs are processed one at a time, in assembly order. Each job captures a
//! single [`GenerationStamp`] used for all of its artifacts. A render error
//! aborts only the job it happened in.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use crate::assemble;
use crate::errors::{self, WbteqError};
use crate::fs::FileSystem;
use crate::observe::{PipelineEvent, PipelineObserver};
use crate::records::RecordSource;
use crate::render::{
    Clock, DriverScript, GenerationStamp, RenderOutcome, RenderedStep, StepRenderer,
    write_driver_script,
};
use crate::types::{Credentials, JobDefinition, check_job_name, check_step_filename};

/// Folders and credentials for one run.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub library: PathBuf,
    pub work: PathBuf,
    pub credentials: Credentials,
}

/// Everything produced for one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedJob {
    pub job_name: String,
    pub stamp: GenerationStamp,
    pub steps: Vec<RenderedStep>,
    pub script: DriverScript,
}

#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Jobs with a driver script, in assembly order.
    pub generated: Vec<GeneratedJob>,
    /// Names of jobs whose rendering failed.
    pub failed: Vec<String>,
}

pub struct Pipeline<'a> {
    fs: &'a dyn FileSystem,
    observer: &'a dyn PipelineObserver,
    clock: &'a dyn Clock,
    settings: &'a PipelineSettings,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        observer: &'a dyn PipelineObserver,
        clock: &'a dyn Clock,
        settings: &'a PipelineSettings,
    ) -> Self {
        Self {
            fs,
            observer,
            clock,
            settings,
        }
    }

    /// Assemble and validate the jobs from `source`.
    pub fn build_job_definitions(&self, source: &dyn RecordSource) -> Result<Vec<JobDefinition>> {
        assemble::build_job_definitions(source, self.fs, &self.settings.library, self.observer)
    }

    /// Render all steps of `job` and write its driver script.
    ///
    /// Returns `Ok(None)` when every step was skipped.
    pub fn generate_job(&self, job: &JobDefinition) -> errors::Result<Option<GeneratedJob>> {
        let stamp = GenerationStamp::capture(self.clock);
        let renderer = StepRenderer::new(
            self.fs,
            &self.settings.library,
            &self.settings.work,
            &self.settings.credentials,
        );

        let mut rendered = Vec::with_capacity(job.steps.len());
        for step in job.steps.iter() {
            match renderer.render(step, &stamp)? {
                RenderOutcome::Rendered(r) => {
                    self.observer.observe(&PipelineEvent::StepRendered {
                        job: job.job_name.clone(),
                        filename: r.filename.clone(),
                        path: r.path.clone(),
                    });
                    rendered.push(r);
                }
                RenderOutcome::Skipped(reason) => {
                    self.observer.observe(&PipelineEvent::StepSkipped {
                        job: job.job_name.clone(),
                        filename: step.filename.clone(),
                        reason,
                    });
                }
            }
        }

        if rendered.is_empty() {
            self.observer.observe(&PipelineEvent::NothingToRun {
                job: job.job_name.clone(),
            });
            return Ok(None);
        }

        let script = write_driver_script(self.fs, job, &rendered, &self.settings.work, &stamp)?;
        self.observer.observe(&PipelineEvent::ScriptWritten {
            job: job.job_name.clone(),
            path: script.path.clone(),
        });

        Ok(Some(GeneratedJob {
            job_name: job.job_name.clone(),
            stamp,
            steps: rendered,
            script,
        }))
    }

    /// Generate every job in order; a failing job is reported and skipped.
    ///
    /// A job whose file prefix was already taken by an earlier job fails
    /// instead of overwriting that job's script and log.
    pub fn generate_all(&self, jobs: &[JobDefinition]) -> GenerationReport {
        let mut report = GenerationReport::default();
        let mut prefixes: HashMap<String, &str> = HashMap::new();
        for job in jobs {
            let result = claim_file_names(job, &mut prefixes).and_then(|()| self.generate_job(job));
            match result {
                Ok(Some(generated)) => report.generated.push(generated),
                Ok(None) => {}
                Err(err) => {
                    self.observer.observe(&PipelineEvent::JobFailed {
                        job: job.job_name.clone(),
                        error: format!("{err:#}"),
                    });
                    report.failed.push(job.job_name.clone());
                }
            }
        }
        report
    }
}

/// Check that `job` can be written out under plain, unused file names.
fn claim_file_names<'j>(
    job: &'j JobDefinition,
    prefixes: &mut HashMap<String, &'j str>,
) -> errors::Result<()> {
    check_job_name(&job.job_name).map_err(WbteqError::ConfigError)?;
    for filename in job.filenames() {
        check_step_filename(filename).map_err(WbteqError::ConfigError)?;
    }

    let prefix = job.file_prefix();
    if let Some(other) = prefixes.get(prefix.as_str()) {
        return Err(WbteqError::ConfigError(format!(
            "file prefix '{prefix}' is already used by job '{other}'"
        )));
    }
    prefixes.insert(prefix, &job.job_name);
    Ok(())
}

/// Create the working folder if it does not exist yet.
pub fn ensure_work_folder(fs: &dyn FileSystem, work: &Path) -> Result<()> {
    if fs.is_dir(work) {
        info!(folder = ?work, "working folder already exists");
    } else {
        fs.create_dir_all(work)?;
        info!(folder = ?work, "working folder has been created");
    }
    Ok(())
}
