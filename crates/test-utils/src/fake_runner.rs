use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use wbteq::errors::Result;
use wbteq::exec::ScriptRunner;
use wbteq::render::DriverScript;
use wbteq::types::ScriptOutcome;

/// A fake runner that:
/// - records which scripts were "run", in order
/// - reports `Failed(1)` for scripts whose job name is in `failing`, and
///   `Success` for everything else.
#[derive(Debug, Clone, Default)]
pub struct FakeRunner {
    executed: Arc<Mutex<Vec<String>>>,
    failing: Vec<String>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_job(mut self, job_name: &str) -> Self {
        self.failing.push(job_name.to_string());
        self
    }

    /// Script file names in execution order.
    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

impl ScriptRunner for FakeRunner {
    fn run_script(
        &mut self,
        script: &DriverScript,
        _work_dir: &Path,
    ) -> Pin<Box<dyn Future<Output = Result<ScriptOutcome>> + Send + '_>> {
        let executed = Arc::clone(&self.executed);
        let name = script.script_name.clone();
        let outcome: Result<ScriptOutcome> = if self.failing.contains(&script.job_name) {
            Ok(ScriptOutcome::Failed(1))
        } else {
            Ok(ScriptOutcome::Success)
        };

        Box::pin(async move {
            executed.lock().unwrap().push(name);
            outcome
        })
    }
}
