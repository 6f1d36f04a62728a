use std::sync::{Arc, Mutex};

use wbteq::observe::{PipelineEvent, PipelineObserver, TracingObserver};

/// Observer that keeps every event (and still logs it via tracing).
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<PipelineEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Names of jobs rejected before rendering, with the reason text.
    pub fn rejections(&self) -> Vec<(String, String)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PipelineEvent::JobRejected { job, reason } => Some((job, reason.to_string())),
                _ => None,
            })
            .collect()
    }

    pub fn skipped_files(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PipelineEvent::StepSkipped { filename, .. } => Some(filename),
                _ => None,
            })
            .collect()
    }
}

impl PipelineObserver for RecordingObserver {
    fn observe(&self, event: &PipelineEvent) {
        TracingObserver.observe(event);
        self.events.lock().unwrap().push(event.clone());
    }
}
