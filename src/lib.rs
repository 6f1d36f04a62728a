// src/lib.rs

pub mod assemble;
pub mod cli;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod observe;
pub mod pipeline;
pub mod records;
pub mod render;
pub mod retention;
pub mod types;

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::errors::WbteqError;
use crate::exec::{ProcessRunner, ScriptRun, ScriptRunner};
use crate::fs::{FileSystem, RealFileSystem};
use crate::observe::{PipelineObserver, TracingObserver};
use crate::pipeline::{GeneratedJob, Pipeline, PipelineSettings, ensure_work_folder};
use crate::records::{RecordSource, TomlRecordSource};
use crate::render::{Clock, SystemClock};
use crate::retention::Retention;
use crate::types::{Credentials, JobDefinition};

/// Options for one invocation, independent of where they came from.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub settings: PipelineSettings,
    pub retention: Retention,
    /// Render everything but do not execute any driver script.
    pub dry_run: bool,
}

impl RunOptions {
    pub fn from_args(args: &CliArgs) -> Self {
        Self {
            settings: PipelineSettings {
                library: PathBuf::from(&args.lib),
                work: PathBuf::from(&args.folder),
                credentials: Credentials::new(&args.username, &args.password),
            },
            retention: Retention::new(args.days),
            dry_run: args.dry_run,
        }
    }
}

/// What happened during one invocation.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub jobs: Vec<JobDefinition>,
    pub generated: Vec<GeneratedJob>,
    pub failed_jobs: Vec<String>,
    pub runs: Vec<ScriptRun>,
}

impl RunSummary {
    /// No job failed to render and every executed script exited with 0.
    pub fn is_success(&self) -> bool {
        self.failed_jobs.is_empty() && self.runs.iter().all(|r| r.outcome.is_success())
    }
}

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - the record file
/// - the real filesystem, clock and tracing observer
/// - the `sh` process runner
pub async fn run(args: CliArgs) -> Result<RunSummary> {
    let options = RunOptions::from_args(&args);
    let fs = RealFileSystem;
    ensure_library(&fs, &options.settings.library)?;
    let source = TomlRecordSource::open(&args.records)?;

    let mut runner = ProcessRunner::default();
    let summary =
        run_pipeline(&options, &source, &fs, &SystemClock, &TracingObserver, &mut runner).await?;

    if options.dry_run {
        print_dry_run(&summary);
    }
    Ok(summary)
}

/// Full pipeline with every collaborator injected.
///
/// Fails only for configuration problems (missing library folder, unusable
/// working folder, unreadable records); per-job and per-step problems are
/// reported to `observer` and collected in the summary.
pub async fn run_pipeline(
    options: &RunOptions,
    source: &dyn RecordSource,
    fs: &dyn FileSystem,
    clock: &dyn Clock,
    observer: &dyn PipelineObserver,
    runner: &mut dyn ScriptRunner,
) -> Result<RunSummary> {
    let settings = &options.settings;
    ensure_library(fs, &settings.library)?;

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    info!(cwd = ?cwd, "current folder");

    ensure_work_folder(fs, &settings.work)?;
    options.retention.apply(&settings.work);

    let pipeline = Pipeline::new(fs, observer, clock, settings);
    let jobs = pipeline.build_job_definitions(source)?;
    info!(count = jobs.len(), "valid job(s) found");
    for job in jobs.iter() {
        info!(job = %job.job_name, steps = job.steps.len(), "job ready");
    }

    let report = pipeline.generate_all(&jobs);

    let runs = if options.dry_run {
        debug!("dry-run: not executing driver scripts");
        Vec::new()
    } else {
        exec::run_scripts(runner, &report.generated, &settings.work, observer).await
    };

    Ok(RunSummary {
        jobs,
        generated: report.generated,
        failed_jobs: report.failed,
        runs,
    })
}

/// A missing library folder is checked before anything else is read.
fn ensure_library(fs: &dyn FileSystem, library: &Path) -> Result<()> {
    if !fs.is_dir(library) {
        return Err(WbteqError::LibraryNotFound(library.to_path_buf()).into());
    }
    Ok(())
}

/// Simple dry-run output: print jobs, rendered steps and driver scripts.
fn print_dry_run(summary: &RunSummary) {
    println!("wbteq dry-run");
    println!();

    println!("jobs ({}):", summary.jobs.len());
    for job in summary.jobs.iter() {
        println!("  - {} (id {})", job.job_name, job.job_id);
        for step in job.steps.iter() {
            println!("      [{}] {}", step.seq_num, step.filename);
        }
    }

    println!();
    println!("driver scripts ({}):", summary.generated.len());
    for generated in summary.generated.iter() {
        println!("  - {}", generated.script.path.display());
        println!("      log: {}", generated.script.log_name);
        for step in generated.steps.iter() {
            println!("      step: {}", step.filename);
        }
    }

    if !summary.failed_jobs.is_empty() {
        println!();
        println!("failed jobs: {:?}", summary.failed_jobs);
    }
}
