// src/render/template.rs

//! Placeholder grammar shared by extraction and substitution.
//!
//! A placeholder is a lowercase identifier in braces: a lowercase ASCII
//! letter or `_`, then any lowercase letters, digits or `_`. Examples are
//! `{username}`, `{param1}` and `{load_dt}`. Anything else inside braces
//! (`{Name}`, `{1x}`, `{}`, `{ x }`) is ordinary text and is copied through
//! unchanged.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::{Result, WbteqError};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z_][a-z0-9_]*)\}").expect("placeholder pattern compiles"));

/// Names of every placeholder appearing in `text`.
pub fn placeholders(text: &str) -> BTreeSet<&str> {
    PLACEHOLDER
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Replace every placeholder in `text` with its value from `params`.
///
/// A placeholder with no value is an error naming the key; it is never
/// replaced with an empty string.
pub fn substitute(
    text: &str,
    params: &BTreeMap<String, String>,
    template_name: &str,
) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(text) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let value = params.get(name.as_str()).ok_or_else(|| {
            WbteqError::MissingPlaceholderValue {
                key: name.as_str().to_string(),
                template: template_name.to_string(),
            }
        })?;
        out.push_str(&text[last..whole.start()]);
        out.push_str(value);
        last = whole.end();
    }
    out.push_str(&text[last..]);

    Ok(out)
}
