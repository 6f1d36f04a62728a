// src/types.rs

//! Record and definition types shared across the pipeline.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

pub type JobId = i64;
pub type StepId = i64;

/// A job record as supplied by a [`RecordSource`](crate::records::RecordSource).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Job {
    pub job_id: JobId,
    pub job_name: String,
    #[serde(default)]
    pub job_email: String,
}

impl Job {
    pub fn new(job_id: JobId, job_name: impl Into<String>, job_email: impl Into<String>) -> Self {
        Self {
            job_id,
            job_name: job_name.into(),
            job_email: job_email.into(),
        }
    }
}

/// A step record. `filename` names a template in the library folder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Step {
    pub job_id: JobId,
    pub step_id: StepId,
    pub filename: String,
    pub seq_num: i64,
}

impl Step {
    pub fn new(job_id: JobId, step_id: StepId, filename: impl Into<String>, seq_num: i64) -> Self {
        Self {
            job_id,
            step_id,
            filename: filename.into(),
            seq_num,
        }
    }
}

/// A named substitution value scoped to one step.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Param {
    pub step_id: StepId,
    pub param_name: String,
    pub param_value: String,
}

impl Param {
    pub fn new(step_id: StepId, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            step_id,
            param_name: name.into(),
            param_value: value.into(),
        }
    }
}

/// One step of an assembled job, with its own parameter map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDefinition {
    pub step_id: StepId,
    pub seq_num: i64,
    pub filename: String,
    pub params: BTreeMap<String, String>,
}

/// A job joined with its steps (in execution order) and their params.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDefinition {
    pub job_id: JobId,
    pub job_name: String,
    pub job_email: String,
    pub steps: Vec<StepDefinition>,
}

impl JobDefinition {
    /// Prefix for the driver script and log file names.
    pub fn file_prefix(&self) -> String {
        file_prefix(&self.job_name)
    }

    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|s| s.filename.as_str())
    }
}

/// Job names become file prefixes with spaces replaced by underscores.
pub fn file_prefix(job_name: &str) -> String {
    job_name.replace(' ', "_")
}

// Job prefixes and step file names are written unquoted into driver script
// lines, so both are limited to this set.
fn is_plain_file_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
}

/// Check that `job_name` maps to a plain file prefix.
///
/// Spaces are allowed (they become `_`); any other whitespace, path
/// separators or shell metacharacters are not.
pub fn check_job_name(job_name: &str) -> Result<(), String> {
    if job_name.trim().is_empty() {
        return Err("job name is empty".to_string());
    }
    match job_name.chars().find(|&c| c != ' ' && !is_plain_file_char(c)) {
        Some(c) => Err(format!(
            "job name '{job_name}' contains {c:?}; only letters, digits, ' ', '_', '-' and '.' are allowed"
        )),
        None => Ok(()),
    }
}

/// Check that `filename` is a plain file name inside the library.
pub fn check_step_filename(filename: &str) -> Result<(), String> {
    if filename.is_empty() {
        return Err("file name is empty".to_string());
    }
    if filename == "." || filename == ".." {
        return Err(format!("file name '{filename}' is not a file"));
    }
    match filename.chars().find(|&c| !is_plain_file_char(c)) {
        Some(c) => Err(format!(
            "file name '{filename}' contains {c:?}; only letters, digits, '_', '-' and '.' are allowed"
        )),
        None => Ok(()),
    }
}

/// Why a job was dropped before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    NoSteps,
    FileNotFound { filename: String },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NoSteps => write!(f, "no steps"),
            RejectReason::FileNotFound { filename } => write!(f, "file not found: {filename}"),
        }
    }
}

/// Why a single step was left out of a job's driver script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The template lacks `{username}` and/or `{password}`.
    MissingCredentials { missing: Vec<String> },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingCredentials { missing } => {
                write!(f, "placeholder(s) not found: {}", missing.join(", "))
            }
        }
    }
}

/// Exit status of one driver script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptOutcome {
    Success,
    /// Non-zero exit code, or `-1` when the process was killed by a signal.
    Failed(i32),
}

impl ScriptOutcome {
    pub fn from_code(code: Option<i32>) -> Self {
        match code {
            Some(0) => ScriptOutcome::Success,
            Some(c) => ScriptOutcome::Failed(c),
            None => ScriptOutcome::Failed(-1),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ScriptOutcome::Success)
    }
}

/// Logon credentials injected into every rendered step.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
