// src/render/mod.rs

//! Rendering of job artifacts into the working folder.
//!
//! - [`template`] holds the placeholder grammar and substitution.
//! - [`StepRenderer`] turns one library template into one rendered file.
//! - [`script`] writes the per-job driver script.
//! - [`stamp`] provides the per-job [`GenerationStamp`] and the [`Clock`] it
//!   is captured from.

pub mod script;
pub mod stamp;
pub mod template;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::Result;
use crate::fs::FileSystem;
use crate::types::{Credentials, SkipReason, StepDefinition, StepId};

pub use script::{DriverScript, write_driver_script};
pub use stamp::{Clock, GenerationStamp, SystemClock};

/// Keys injected into every step's parameters; both must appear in a
/// template for it to be rendered.
pub const USERNAME_KEY: &str = "username";
pub const PASSWORD_KEY: &str = "password";

/// First line of every rendered template.
pub fn template_header(stamp: &GenerationStamp) -> String {
    format!("-- This file is generated by WBTEQ at {stamp}\n")
}

/// A template written to the working folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedStep {
    pub step_id: StepId,
    pub filename: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered(RenderedStep),
    Skipped(SkipReason),
}

/// Renders library templates for one run's credentials.
#[derive(Debug, Clone, Copy)]
pub struct StepRenderer<'a> {
    fs: &'a dyn FileSystem,
    library: &'a Path,
    work: &'a Path,
    credentials: &'a Credentials,
}

impl<'a> StepRenderer<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        library: &'a Path,
        work: &'a Path,
        credentials: &'a Credentials,
    ) -> Self {
        Self {
            fs,
            library,
            work,
            credentials,
        }
    }

    /// Render `step` from the library into the working folder.
    ///
    /// Nothing is written when the template lacks `{username}` or
    /// `{password}`; that is reported as [`RenderOutcome::Skipped`].
    pub fn render(&self, step: &StepDefinition, stamp: &GenerationStamp) -> Result<RenderOutcome> {
        let source = self.library.join(&step.filename);
        let text = self.fs.read_to_string(&source)?;

        let found = template::placeholders(&text);
        debug!(file = %step.filename, placeholders = ?found, "scanned template");

        let missing: Vec<String> = [USERNAME_KEY, PASSWORD_KEY]
            .into_iter()
            .filter(|key| !found.contains(key))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Ok(RenderOutcome::Skipped(SkipReason::MissingCredentials { missing }));
        }

        let mut params = step.params.clone();
        params.insert(USERNAME_KEY.to_string(), self.credentials.username.clone());
        params.insert(PASSWORD_KEY.to_string(), self.credentials.password.clone());

        let body = template::substitute(&text, &params, &step.filename)?;

        let target = self.work.join(&step.filename);
        let mut contents = template_header(stamp);
        contents.push_str(&body);
        self.fs.write(&target, contents.as_bytes())?;

        Ok(RenderOutcome::Rendered(RenderedStep {
            step_id: step.step_id,
            filename: step.filename.clone(),
            path: target,
        }))
    }
}
