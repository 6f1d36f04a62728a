// src/logging.rs

//! Logging setup for `wbteq` using `tracing` + `tracing-subscriber`.
//!
//! The active filter comes from, in order:
//! 1. `--log-level` (one level for every target)
//! 2. `WBTEQ_LOG`, in `EnvFilter` syntax, e.g. `info,wbteq::render=debug`
//! 3. `info`
//!
//! Logs are sent to STDERR so that stdout stays free for dry-run output.

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

pub const LOG_ENV: &str = "WBTEQ_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

/// Initialise global logging subscriber.
///
/// Safe to call once at startup. An unparsable `WBTEQ_LOG` is an error.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV).ok();
    let filter = build_filter(cli_level, env.as_deref())?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

pub fn build_filter(cli_level: Option<LogLevel>, env: Option<&str>) -> Result<EnvFilter> {
    if let Some(level) = cli_level {
        return Ok(EnvFilter::new(level.as_directive()));
    }
    match env.map(str::trim).filter(|s| !s.is_empty()) {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid {LOG_ENV} value '{directives}'")),
        None => Ok(EnvFilter::new(DEFAULT_DIRECTIVE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shown(filter: &EnvFilter) -> String {
        filter.to_string().to_lowercase()
    }

    #[test]
    fn per_target_directives_are_kept() {
        let filter = build_filter(None, Some("warn,wbteq::render=debug")).unwrap();
        assert!(shown(&filter).contains("wbteq::render=debug"), "{filter}");
    }

    #[test]
    fn cli_level_overrides_the_environment() {
        let filter = build_filter(Some(LogLevel::Trace), Some("wbteq=error")).unwrap();
        assert!(shown(&filter).contains("trace"), "{filter}");
        assert!(!shown(&filter).contains("wbteq=error"), "{filter}");
    }

    #[test]
    fn blank_environment_falls_back_to_info() {
        let filter = build_filter(None, Some("  ")).unwrap();
        assert!(shown(&filter).contains("info"), "{filter}");
    }

    #[test]
    fn invalid_level_is_an_error() {
        let err = build_filter(None, Some("wbteq=loud")).unwrap_err();
        assert!(err.to_string().contains("WBTEQ_LOG"));
    }
}
