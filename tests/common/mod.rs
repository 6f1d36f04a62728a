#![allow(dead_code)]

use std::path::{Path, PathBuf};

use wbteq::RunOptions;
use wbteq::fs::mock::MockFileSystem;
use wbteq::pipeline::PipelineSettings;
use wbteq::retention::Retention;
use wbteq::types::Credentials;

// Each test binary pulls in a different subset of these.
#[allow(unused_imports)]
pub use wbteq_test_utils::builders;
#[allow(unused_imports)]
pub use wbteq_test_utils::fake_runner::FakeRunner;
#[allow(unused_imports)]
pub use wbteq_test_utils::recording::RecordingObserver;
#[allow(unused_imports)]
pub use wbteq_test_utils::{FixedClock, init_tracing};

pub const LIB: &str = "lib";
pub const WORK: &str = "work";

/// 2024-05-01 08:30:00, the instant most tests generate at.
pub fn clock() -> FixedClock {
    FixedClock::at(2024, 5, 1, 8, 30, 0)
}

pub fn settings(lib: impl AsRef<Path>, work: impl AsRef<Path>) -> PipelineSettings {
    PipelineSettings {
        library: lib.as_ref().to_path_buf(),
        work: work.as_ref().to_path_buf(),
        credentials: Credentials::new("u", "p"),
    }
}

pub fn options(lib: impl AsRef<Path>, work: impl AsRef<Path>, dry_run: bool) -> RunOptions {
    RunOptions {
        settings: settings(lib, work),
        retention: Retention::new(7),
        dry_run,
    }
}

pub fn lib_path(filename: &str) -> PathBuf {
    Path::new(LIB).join(filename)
}

pub fn work_path(filename: &str) -> PathBuf {
    Path::new(WORK).join(filename)
}

/// Mock library with templates for every step of `builders::sample_catalog`.
pub fn sample_library() -> MockFileSystem {
    let fs = MockFileSystem::new();
    fs.add_file(
        lib_path("j1_s1.bteq"),
        ".LOGON tdp/{username},{password};\nSELECT '{param1}', '{param2}';\n.LOGOFF;\n",
    );
    fs.add_file(
        lib_path("j1_s2.bteq"),
        ".LOGON tdp/{username},{password};\nSELECT '{paramx}', '{paramy}';\n",
    );
    fs.add_file(
        lib_path("j2_s1.bteq"),
        ".LOGON tdp/{username},{password};\nDELETE FROM t WHERE c = '{param1}';\n",
    );
    fs.add_file(
        lib_path("j2_s2.bteq"),
        ".LOGON tdp/{username},{password};\nINSERT INTO t VALUES ('{param1}');\n",
    );
    fs
}

/// Body of a rendered file, without its provenance line.
pub fn body(contents: &str) -> &str {
    contents.split_once('\n').map(|(_, rest)| rest).unwrap_or("")
}
