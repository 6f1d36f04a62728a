// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WbteqError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Library folder not found: {0:?} (please make sure it is created)")]
    LibraryNotFound(PathBuf),

    #[error("No value for placeholder '{{{key}}}' in template '{template}'")]
    MissingPlaceholderValue { key: String, template: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, WbteqError>;
