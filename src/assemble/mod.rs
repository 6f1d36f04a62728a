// src/assemble/mod.rs

//! Job assembly: join flat job/step/param records into [`JobDefinition`]s.
//!
//! - [`assemble`] performs the pure join and rejects jobs without steps.
//! - [`validate`] checks that every step's template exists in the library.
//! - [`build_job_definitions`] runs both against a [`RecordSource`] and
//!   reports every accept/reject decision to the observer.

pub mod validate;

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use anyhow::Result;
use tracing::debug;

use crate::fs::FileSystem;
use crate::observe::{PipelineEvent, PipelineObserver};
use crate::records::RecordSource;
use crate::types::{
    Job, JobDefinition, JobId, Param, RejectReason, Step, StepDefinition, StepId,
};

pub use validate::check_job_files;

/// Outcome of assembling one job record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    Assembled(JobDefinition),
    Rejected(Rejection),
}

/// A job dropped before rendering, with the reason it was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub job_id: JobId,
    pub job_name: String,
    pub reason: RejectReason,
}

/// Join records into one candidate per job, in record-source job order.
///
/// - Steps are ordered by `seq_num`, ties broken by `step_id`.
/// - For a repeated `param_name` on one step, the later record wins.
/// - Steps and params pointing at unknown ids contribute to nothing.
pub fn assemble(jobs: &[Job], steps: &[Step], params: &[Param]) -> Vec<Candidate> {
    let mut params_by_step: HashMap<StepId, BTreeMap<String, String>> = HashMap::new();
    for p in params {
        params_by_step
            .entry(p.step_id)
            .or_default()
            .insert(p.param_name.clone(), p.param_value.clone());
    }

    let mut steps_by_job: HashMap<JobId, Vec<&Step>> = HashMap::new();
    for s in steps {
        steps_by_job.entry(s.job_id).or_default().push(s);
    }

    jobs.iter()
        .map(|job| {
            let mut job_steps = steps_by_job.remove(&job.job_id).unwrap_or_default();
            if job_steps.is_empty() {
                return Candidate::Rejected(Rejection {
                    job_id: job.job_id,
                    job_name: job.job_name.clone(),
                    reason: RejectReason::NoSteps,
                });
            }
            job_steps.sort_by_key(|s| (s.seq_num, s.step_id));

            let steps = job_steps
                .into_iter()
                .map(|s| StepDefinition {
                    step_id: s.step_id,
                    seq_num: s.seq_num,
                    filename: s.filename.clone(),
                    params: params_by_step.get(&s.step_id).cloned().unwrap_or_default(),
                })
                .collect();

            Candidate::Assembled(JobDefinition {
                job_id: job.job_id,
                job_name: job.job_name.clone(),
                job_email: job.job_email.clone(),
                steps,
            })
        })
        .collect()
}

/// Assemble and validate every job from `source` against `library`.
///
/// Returns only the jobs that can be rendered; every dropped job is reported
/// to `observer` with its reason.
pub fn build_job_definitions(
    source: &dyn RecordSource,
    fs: &dyn FileSystem,
    library: &Path,
    observer: &dyn PipelineObserver,
) -> Result<Vec<JobDefinition>> {
    let jobs = source.list_jobs()?;
    let steps = source.list_steps()?;
    let params = source.list_params()?;

    let mut accepted = Vec::new();
    for candidate in assemble(&jobs, &steps, &params) {
        let job = match candidate {
            Candidate::Assembled(job) => job,
            Candidate::Rejected(rejection) => {
                observer.observe(&PipelineEvent::JobRejected {
                    job: rejection.job_name,
                    reason: rejection.reason,
                });
                continue;
            }
        };

        debug!(job = %job.job_name, ?job, "assembled job");
        match check_job_files(&job, fs, library) {
            Ok(()) => {
                observer.observe(&PipelineEvent::JobAccepted {
                    job: job.job_name.clone(),
                    steps: job.steps.len(),
                });
                accepted.push(job);
            }
            Err(reason) => observer.observe(&PipelineEvent::JobRejected {
                job: job.job_name,
                reason,
            }),
        }
    }

    Ok(accepted)
}
