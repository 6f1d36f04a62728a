// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `wbteq`.
///
/// Deliberately not `Debug`: the struct carries the logon password.
#[derive(Clone, Parser)]
#[command(
    name = "wbteq",
    version,
    about = "Render BTEQ job templates into driver scripts and run them.",
    long_about = None
)]
pub struct CliArgs {
    /// The Teradata logon name substituted for `{username}`.
    pub username: String,

    /// The Teradata logon password substituted for `{password}`.
    pub password: String,

    /// The library folder holding the job templates.
    #[arg(short, long, value_name = "DIR", default_value = "_libs")]
    pub lib: String,

    /// The working folder for rendered templates, driver scripts and logs.
    ///
    /// Created if it does not exist.
    #[arg(short, long, value_name = "DIR", default_value = "_wbteq")]
    pub folder: String,

    /// The number of days to keep logs/scripts in the working folder.
    #[arg(short, long, value_name = "DAYS", default_value_t = 7)]
    pub days: u32,

    /// Path to the job/step/param record file (TOML).
    #[arg(short, long, value_name = "PATH", default_value = "wbteq.toml")]
    pub records: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WBTEQ_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Assemble and render everything, print the plan, but don't run any script.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// The level as an `EnvFilter` directive.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_folders() {
        let args = CliArgs::try_parse_from(["wbteq", "dbc", "secret"]).unwrap();
        assert_eq!(args.username, "dbc");
        assert_eq!(args.password, "secret");
        assert_eq!(args.lib, "_libs");
        assert_eq!(args.folder, "_wbteq");
        assert_eq!(args.days, 7);
        assert_eq!(args.records, "wbteq.toml");
        assert!(!args.dry_run);
    }

    #[test]
    fn short_flags_override_defaults() {
        let args = CliArgs::try_parse_from([
            "wbteq", "u", "p", "-l", "libs", "-f", "work", "-d", "3", "-r", "jobs.toml",
        ])
        .unwrap();
        assert_eq!(args.lib, "libs");
        assert_eq!(args.folder, "work");
        assert_eq!(args.days, 3);
        assert_eq!(args.records, "jobs.toml");
    }

    #[test]
    fn credentials_are_required() {
        assert!(CliArgs::try_parse_from(["wbteq", "only-user"]).is_err());
    }
}
