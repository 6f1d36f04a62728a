#![allow(dead_code)]

use wbteq::records::StaticRecordSource;
use wbteq::types::{Job, Param, Step};

/// Builder for `StaticRecordSource` to simplify test setup.
#[derive(Debug, Default)]
pub struct RecordsBuilder {
    source: StaticRecordSource,
}

impl RecordsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn job(mut self, job_id: i64, name: &str) -> Self {
        let email = format!("{}@example.com", name.replace(' ', "").to_lowercase());
        self.source.jobs.push(Job::new(job_id, name, email));
        self
    }

    pub fn step(mut self, job_id: i64, step_id: i64, filename: &str, seq_num: i64) -> Self {
        self.source
            .steps
            .push(Step::new(job_id, step_id, filename, seq_num));
        self
    }

    pub fn param(mut self, step_id: i64, name: &str, value: &str) -> Self {
        self.source.params.push(Param::new(step_id, name, value));
        self
    }

    pub fn build(self) -> StaticRecordSource {
        self.source
    }
}

/// Small catalog of three jobs:
/// two with two steps each and `Job 3` with none.
pub fn sample_catalog() -> StaticRecordSource {
    RecordsBuilder::new()
        .job(1, "Job 1")
        .job(2, "Job 2")
        .job(3, "Job 3")
        .step(1, 1, "j1_s1.bteq", 10)
        .step(1, 2, "j1_s2.bteq", 20)
        .step(2, 3, "j2_s1.bteq", 10)
        .step(2, 4, "j2_s2.bteq", 20)
        .param(1, "param1", "v_param1")
        .param(1, "param2", "v_param2")
        .param(2, "paramy", "v_param1")
        .param(2, "paramx", "v_param1")
        .param(3, "param1", "v_param1")
        .param(4, "param1", "v_param1")
        .build()
}
