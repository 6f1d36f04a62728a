// src/exec/backend.rs

//! Pluggable script runner abstraction.
//!
//! The run loop talks to a `ScriptRunner` instead of spawning processes
//! itself, so tests can swap in a fake that records which scripts would
//! have run.
//!
//! - `ProcessRunner` is the implementation used by `wbteq`: it runs each
//!   driver script with `sh` inside the working folder and waits for it.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::process::Stdio;

use anyhow::Context;
use tokio::process::Command;
use tracing::debug;

use crate::errors::Result;
use crate::render::DriverScript;
use crate::types::ScriptOutcome;

/// Trait abstracting how driver scripts are executed.
pub trait ScriptRunner: Send {
    /// Run `script` to completion with `work_dir` as current directory.
    fn run_script(
        &mut self,
        script: &DriverScript,
        work_dir: &Path,
    ) -> Pin<Box<dyn Future<Output = Result<ScriptOutcome>> + Send + '_>>;
}

/// Runs driver scripts as `sh <script>` child processes.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    shell: String,
}

impl ProcessRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new("sh")
    }
}

impl ScriptRunner for ProcessRunner {
    fn run_script(
        &mut self,
        script: &DriverScript,
        work_dir: &Path,
    ) -> Pin<Box<dyn Future<Output = Result<ScriptOutcome>> + Send + '_>> {
        Box::pin(run_with_shell(
            self.shell.clone(),
            script.script_name.clone(),
            work_dir.to_path_buf(),
        ))
    }
}

async fn run_with_shell(shell: String, script_name: String, work_dir: PathBuf) -> Result<ScriptOutcome> {
    debug!(shell = %shell, script = %script_name, dir = ?work_dir, "spawning driver script");

    let status = Command::new(&shell)
        .arg(&script_name)
        .current_dir(&work_dir)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .status()
        .await
        .with_context(|| format!("running driver script '{}' in {:?}", script_name, work_dir))?;

    Ok(ScriptOutcome::from_code(status.code()))
}
