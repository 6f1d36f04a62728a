// tests/pipeline_generation.rs

mod common;
use crate::common::builders::{RecordsBuilder, sample_catalog};
use crate::common::{
    RecordingObserver, WORK, body, clock, init_tracing, lib_path, sample_library, settings,
    work_path,
};

use std::error::Error;
use std::sync::Mutex;

use chrono::{Duration, NaiveDateTime};
use wbteq::fs::mock::MockFileSystem;
use wbteq::observe::PipelineEvent;
use wbteq::pipeline::Pipeline;
use wbteq::render::Clock;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn sample_catalog_generates_two_jobs_and_rejects_the_empty_one() -> TestResult {
    init_tracing();
    let fs = sample_library();
    let observer = RecordingObserver::new();
    let clock = clock();
    let settings = settings(common::LIB, WORK);
    let pipeline = Pipeline::new(&fs, &observer, &clock, &settings);

    let jobs = pipeline.build_job_definitions(&sample_catalog())?;
    let names: Vec<_> = jobs.iter().map(|j| j.job_name.as_str()).collect();
    assert_eq!(names, vec!["Job 1", "Job 2"]);
    assert_eq!(
        observer.rejections(),
        vec![("Job 3".to_string(), "no steps".to_string())]
    );

    let report = pipeline.generate_all(&jobs);
    assert!(report.failed.is_empty());
    let scripts: Vec<_> = report
        .generated
        .iter()
        .map(|g| g.script.script_name.as_str())
        .collect();
    assert_eq!(
        scripts,
        vec!["Job_1_20240501_083000.sh", "Job_2_20240501_083000.sh"]
    );

    let s1 = fs.contents(work_path("j1_s1.bteq")).ok_or("j1_s1 not rendered")?;
    assert_eq!(
        body(&s1),
        ".LOGON tdp/u,p;\nSELECT 'v_param1', 'v_param2';\n.LOGOFF;\n"
    );

    let driver = fs
        .contents(work_path("Job_1_20240501_083000.sh"))
        .ok_or("driver script missing")?;
    assert_eq!(
        driver,
        "# This file is generated by WBTEQ at 2024-05-01 08:30:00.000000\n\
         cat < j1_s1.bteq >> Job_1_20240501_083000.log\n\
         cat < j1_s2.bteq >> Job_1_20240501_083000.log\n"
    );
    assert!(fs.is_executable(work_path("Job_1_20240501_083000.sh")));

    Ok(())
}

#[test]
fn single_step_job_renders_expected_text() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file(lib_path("j1_s1.bteq"), "user={username} pass={password} p={param1}");
    let records = RecordsBuilder::new()
        .job(1, "Job 1")
        .step(1, 1, "j1_s1.bteq", 10)
        .param(1, "param1", "v1")
        .build();
    let observer = RecordingObserver::new();
    let clock = clock();
    let settings = settings(common::LIB, WORK);
    let pipeline = Pipeline::new(&fs, &observer, &clock, &settings);

    let jobs = pipeline.build_job_definitions(&records)?;
    let report = pipeline.generate_all(&jobs);

    let rendered = fs.contents(work_path("j1_s1.bteq")).ok_or("not rendered")?;
    assert!(rendered.contains("user=u pass=p p=v1"));

    let script = &report.generated[0].script;
    let text = fs.contents(&script.path).ok_or("no script")?;
    let cat_lines: Vec<_> = text.lines().filter(|l| l.starts_with("cat ")).collect();
    assert_eq!(cat_lines.len(), 1);
    assert!(cat_lines[0].contains("j1_s1.bteq"));

    Ok(())
}

#[test]
fn missing_template_rejects_job_before_any_rendering() -> TestResult {
    let fs = sample_library();
    let fs_without = MockFileSystem::new();
    for name in ["j1_s1.bteq", "j1_s2.bteq", "j2_s1.bteq"] {
        let text = fs.contents(lib_path(name)).ok_or("fixture")?;
        fs_without.add_file(lib_path(name), text);
    }
    let observer = RecordingObserver::new();
    let clock = clock();
    let settings = settings(common::LIB, WORK);
    let pipeline = Pipeline::new(&fs_without, &observer, &clock, &settings);

    let jobs = pipeline.build_job_definitions(&sample_catalog())?;
    pipeline.generate_all(&jobs);

    assert_eq!(jobs.len(), 1);
    assert!(
        observer
            .rejections()
            .contains(&("Job 2".to_string(), "file not found: j2_s2.bteq".to_string()))
    );
    assert!(fs_without.contents(work_path("j2_s1.bteq")).is_none());
    assert!(
        fs_without
            .files_in(WORK)
            .iter()
            .all(|p| !p.to_string_lossy().contains("Job_2"))
    );

    Ok(())
}

#[test]
fn step_without_credentials_is_left_out_of_the_script() -> TestResult {
    let fs = sample_library();
    fs.add_file(lib_path("j1_s2.bteq"), "SELECT '{paramx}';\n");
    let observer = RecordingObserver::new();
    let clock = clock();
    let settings = settings(common::LIB, WORK);
    let pipeline = Pipeline::new(&fs, &observer, &clock, &settings);

    let jobs = pipeline.build_job_definitions(&sample_catalog())?;
    let report = pipeline.generate_all(&jobs);

    assert_eq!(observer.skipped_files(), vec!["j1_s2.bteq".to_string()]);
    assert!(fs.contents(work_path("j1_s2.bteq")).is_none());

    let job1 = &report.generated[0];
    assert_eq!(job1.steps.len(), 1);
    let text = fs.contents(&job1.script.path).ok_or("no script")?;
    assert!(text.contains("cat < j1_s1.bteq"));
    assert!(!text.contains("j1_s2.bteq"));

    Ok(())
}

#[test]
fn job_with_only_skipped_steps_gets_no_script() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file(lib_path("a.bteq"), "no credentials here");
    let records = RecordsBuilder::new()
        .job(1, "Quiet Job")
        .step(1, 1, "a.bteq", 10)
        .build();
    let observer = RecordingObserver::new();
    let clock = clock();
    let settings = settings(common::LIB, WORK);
    let pipeline = Pipeline::new(&fs, &observer, &clock, &settings);

    let jobs = pipeline.build_job_definitions(&records)?;
    let report = pipeline.generate_all(&jobs);

    assert!(report.generated.is_empty());
    assert!(report.failed.is_empty());
    assert!(fs.files_in(WORK).is_empty());
    assert!(observer.events().contains(&PipelineEvent::NothingToRun {
        job: "Quiet Job".into()
    }));

    Ok(())
}

#[test]
fn missing_placeholder_value_fails_only_that_job() -> TestResult {
    let fs = sample_library();
    fs.add_file(lib_path("j1_s1.bteq"), "{username} {password} {schema}\n");
    let observer = RecordingObserver::new();
    let clock = clock();
    let settings = settings(common::LIB, WORK);
    let pipeline = Pipeline::new(&fs, &observer, &clock, &settings);

    let jobs = pipeline.build_job_definitions(&sample_catalog())?;
    let report = pipeline.generate_all(&jobs);

    assert_eq!(report.failed, vec!["Job 1".to_string()]);
    assert_eq!(report.generated.len(), 1);
    assert_eq!(report.generated[0].job_name, "Job 2");
    assert!(fs.contents(work_path("Job_1_20240501_083000.sh")).is_none());

    let failure = observer
        .events()
        .into_iter()
        .find_map(|e| match e {
            PipelineEvent::JobFailed { job, error } => Some((job, error)),
            _ => None,
        })
        .ok_or("no JobFailed event")?;
    assert_eq!(failure.0, "Job 1");
    assert!(failure.1.contains("schema"));

    Ok(())
}

/// Clock that moves one second forward on every read.
struct TickingClock(Mutex<NaiveDateTime>);

impl Clock for TickingClock {
    fn now(&self) -> NaiveDateTime {
        let mut at = self.0.lock().unwrap();
        let now = *at;
        *at = now + Duration::seconds(1);
        now
    }
}

#[test]
fn each_job_captures_one_stamp_for_all_artifacts() -> TestResult {
    let fs = sample_library();
    let observer = RecordingObserver::new();
    let clock = TickingClock(Mutex::new(common::clock().0));
    let settings = settings(common::LIB, WORK);
    let pipeline = Pipeline::new(&fs, &observer, &clock, &settings);

    let jobs = pipeline.build_job_definitions(&sample_catalog())?;
    let report = pipeline.generate_all(&jobs);

    let job1 = &report.generated[0];
    let job2 = &report.generated[1];
    assert_eq!(job1.script.script_name, "Job_1_20240501_083000.sh");
    assert_eq!(job2.script.script_name, "Job_2_20240501_083001.sh");

    for (job, header) in [
        (job1, "-- This file is generated by WBTEQ at 2024-05-01 08:30:00.000000"),
        (job2, "-- This file is generated by WBTEQ at 2024-05-01 08:30:01.000000"),
    ] {
        for step in job.steps.iter() {
            let text = fs.contents(&step.path).ok_or("missing rendered step")?;
            assert_eq!(text.lines().next(), Some(header));
        }
    }

    Ok(())
}
