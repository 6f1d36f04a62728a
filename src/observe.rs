// src/observe.rs

//! Pipeline decisions as events.
//!
//! Every accept/reject/render/skip decision is emitted as a [`PipelineEvent`]
//! through a [`PipelineObserver`] handed to the pipeline, rather than logged
//! from deep inside each component. Production uses [`TracingObserver`];
//! tests can record events and assert on them.

use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::types::{RejectReason, ScriptOutcome, SkipReason};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    JobAccepted {
        job: String,
        steps: usize,
    },
    JobRejected {
        job: String,
        reason: RejectReason,
    },
    StepRendered {
        job: String,
        filename: String,
        path: PathBuf,
    },
    StepSkipped {
        job: String,
        filename: String,
        reason: SkipReason,
    },
    /// Rendering aborted for the whole job; no driver script was written.
    JobFailed {
        job: String,
        error: String,
    },
    /// Every step was skipped, so there is nothing to put in a driver script.
    NothingToRun {
        job: String,
    },
    ScriptWritten {
        job: String,
        path: PathBuf,
    },
    ScriptFinished {
        job: String,
        path: PathBuf,
        outcome: ScriptOutcome,
    },
}

/// Receiver for pipeline decisions.
pub trait PipelineObserver: Send + Sync {
    fn observe(&self, event: &PipelineEvent);
}

/// Observer that turns each event into a structured `tracing` line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn observe(&self, event: &PipelineEvent) {
        match event {
            PipelineEvent::JobAccepted { job, steps } => {
                info!(job = %job, steps, "new job has been added");
            }
            PipelineEvent::JobRejected { job, reason } => {
                warn!(job = %job, reason = %reason, "job IGNORED");
            }
            PipelineEvent::StepRendered { job, filename, path } => {
                info!(job = %job, file = %filename, path = ?path, "wrote template with replaced values");
            }
            PipelineEvent::StepSkipped { job, filename, reason } => {
                warn!(job = %job, file = %filename, reason = %reason, "step skipped");
            }
            PipelineEvent::JobFailed { job, error } => {
                error!(job = %job, error = %error, "job rendering failed");
            }
            PipelineEvent::NothingToRun { job } => {
                warn!(job = %job, "no renderable steps, driver script not written");
            }
            PipelineEvent::ScriptWritten { job, path } => {
                info!(job = %job, path = ?path, "driver script has been created");
            }
            PipelineEvent::ScriptFinished { job, path, outcome } => match outcome {
                ScriptOutcome::Success => {
                    info!(job = %job, path = ?path, "driver script successful");
                }
                ScriptOutcome::Failed(code) => {
                    warn!(job = %job, path = ?path, code, "driver script failed");
                }
            },
        }
    }
}
