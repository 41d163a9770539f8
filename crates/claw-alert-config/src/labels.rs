//! Label names, label sets, and their grammar.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ConfigError, Result};

/// The labels identifying one alert instance.
pub type LabelSet = HashMap<String, String>;

/// Regex for valid label names.
static LABEL_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap_or_else(|_| unreachable!()));

/// Returns true if `name` is a valid label name.
#[must_use]
pub fn is_valid_label_name(name: &str) -> bool {
    LABEL_NAME_REGEX.is_match(name)
}

/// Checks a label name, reporting `context` on failure.
pub(crate) fn validate_label_name(name: &str, context: &str) -> Result<()> {
    if is_valid_label_name(name) {
        Ok(())
    } else {
        Err(ConfigError::label_name(name, context))
    }
}

/// Looks up a label, treating an absent label as the empty string.
#[must_use]
pub fn label_value<'a>(labels: &'a LabelSet, name: &str) -> &'a str {
    labels.get(name).map_or("", String::as_str)
}
