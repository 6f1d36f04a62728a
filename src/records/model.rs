// src/records/model.rs

use serde::Deserialize;

use crate::types::{Job, Param, Step};

/// Record file as read from TOML, before validation.
///
/// ```toml
/// [[job]]
/// job_id = 1
/// job_name = "Job 1"
/// job_email = "job1@example.com"
///
/// [[step]]
/// job_id = 1
/// step_id = 1
/// filename = "j1_s1.bteq"
/// seq_num = 10
///
/// [[param]]
/// step_id = 1
/// param_name = "param1"
/// param_value = "v_param1"
/// ```
///
/// All three arrays are optional. Order inside each array is significant:
/// jobs are processed in file order and later params win over earlier ones.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawRecordFile {
    #[serde(default)]
    pub job: Vec<Job>,

    #[serde(default)]
    pub step: Vec<Step>,

    #[serde(default)]
    pub param: Vec<Param>,
}

/// Validated record file.
///
/// Only constructible through `TryFrom<RawRecordFile>`, so holding one means
/// ids are unique and file names are plain names.
#[derive(Debug, Clone)]
pub struct RecordFile {
    jobs: Vec<Job>,
    steps: Vec<Step>,
    params: Vec<Param>,
}

impl RecordFile {
    pub(crate) fn new_unchecked(jobs: Vec<Job>, steps: Vec<Step>, params: Vec<Param>) -> Self {
        Self { jobs, steps, params }
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }
}
