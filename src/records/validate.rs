// src/records/validate.rs

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::errors::{Result, WbteqError};
use crate::records::model::{RawRecordFile, RecordFile};
use crate::types::{check_job_name, check_step_filename, file_prefix};

impl TryFrom<RawRecordFile> for RecordFile {
    type Error = WbteqError;

    fn try_from(raw: RawRecordFile) -> std::result::Result<Self, Self::Error> {
        validate_records(&raw)?;
        Ok(RecordFile::new_unchecked(raw.job, raw.step, raw.param))
    }
}

/// Check a raw record file.
///
/// Dangling references (a step whose job does not exist, a param whose step
/// does not exist) are not errors: assembly ignores them.
pub fn validate_records(raw: &RawRecordFile) -> Result<()> {
    validate_jobs(raw)?;
    validate_steps(raw)?;
    log_dangling_references(raw);
    Ok(())
}

fn validate_jobs(raw: &RawRecordFile) -> Result<()> {
    let mut seen = HashSet::new();
    let mut prefixes: HashMap<String, &str> = HashMap::new();
    for job in raw.job.iter() {
        if !seen.insert(job.job_id) {
            return Err(WbteqError::ConfigError(format!(
                "duplicate job_id {} in [[job]]",
                job.job_id
            )));
        }
        if job.job_name.trim().is_empty() {
            return Err(WbteqError::ConfigError(format!(
                "job {} has an empty job_name",
                job.job_id
            )));
        }
        check_job_name(&job.job_name)
            .map_err(|msg| WbteqError::ConfigError(format!("job {}: {msg}", job.job_id)))?;

        // Driver scripts and logs are named after the prefix.
        let prefix = file_prefix(&job.job_name);
        if let Some(other) = prefixes.insert(prefix.clone(), &job.job_name) {
            return Err(WbteqError::ConfigError(format!(
                "job names '{}' and '{}' share the file prefix '{}'",
                other, job.job_name, prefix
            )));
        }
    }
    Ok(())
}

fn validate_steps(raw: &RawRecordFile) -> Result<()> {
    let mut seen = HashSet::new();
    for step in raw.step.iter() {
        if !seen.insert(step.step_id) {
            return Err(WbteqError::ConfigError(format!(
                "duplicate step_id {} in [[step]]",
                step.step_id
            )));
        }
        if step.filename.trim().is_empty() {
            return Err(WbteqError::ConfigError(format!(
                "step {} has an empty filename",
                step.step_id
            )));
        }
        check_step_filename(&step.filename)
            .map_err(|msg| WbteqError::ConfigError(format!("step {}: {msg}", step.step_id)))?;
    }
    Ok(())
}

fn log_dangling_references(raw: &RawRecordFile) {
    let job_ids: HashSet<_> = raw.job.iter().map(|j| j.job_id).collect();
    let step_ids: HashSet<_> = raw.step.iter().map(|s| s.step_id).collect();

    for step in raw.step.iter().filter(|s| !job_ids.contains(&s.job_id)) {
        debug!(step_id = step.step_id, job_id = step.job_id, "step references unknown job");
    }
    for param in raw.param.iter().filter(|p| !step_ids.contains(&p.step_id)) {
        debug!(
            step_id = param.step_id,
            param = %param.param_name,
            "param references unknown step"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Job, Step};

    fn raw(jobs: Vec<Job>, steps: Vec<Step>) -> RawRecordFile {
        RawRecordFile {
            job: jobs,
            step: steps,
            param: vec![],
        }
    }

    #[test]
    fn duplicate_job_ids_are_rejected() {
        let r = raw(vec![Job::new(1, "A", ""), Job::new(1, "B", "")], vec![]);
        let err = RecordFile::try_from(r).unwrap_err();
        assert!(matches!(err, WbteqError::ConfigError(msg) if msg.contains("duplicate job_id 1")));
    }

    #[test]
    fn nested_filenames_are_rejected() {
        let r = raw(
            vec![Job::new(1, "A", "")],
            vec![Step::new(1, 1, "../etc/passwd", 10)],
        );
        assert!(RecordFile::try_from(r).is_err());
    }

    #[test]
    fn job_names_sharing_a_prefix_are_rejected() {
        let r = raw(
            vec![Job::new(1, "Daily Load", ""), Job::new(2, "Daily_Load", "")],
            vec![],
        );
        let err = RecordFile::try_from(r).unwrap_err();
        assert!(
            matches!(&err, WbteqError::ConfigError(msg) if msg.contains("file prefix 'Daily_Load'")),
            "{err}"
        );
    }

    #[test]
    fn job_name_with_a_separator_is_rejected() {
        let r = raw(vec![Job::new(1, "reports/daily", "")], vec![]);
        let err = RecordFile::try_from(r).unwrap_err();
        assert!(matches!(err, WbteqError::ConfigError(msg) if msg.starts_with("job 1:")));
    }

    #[test]
    fn filename_with_whitespace_is_rejected() {
        let r = raw(
            vec![Job::new(1, "A", "")],
            vec![Step::new(1, 1, "load orders.bteq", 10)],
        );
        let err = RecordFile::try_from(r).unwrap_err();
        assert!(matches!(err, WbteqError::ConfigError(msg) if msg.starts_with("step 1:")));
    }

    #[test]
    fn dangling_step_is_accepted() {
        let r = raw(vec![Job::new(1, "A", "")], vec![Step::new(99, 1, "x.bteq", 10)]);
        let file = RecordFile::try_from(r).unwrap();
        assert_eq!(file.steps().len(), 1);
    }
}
