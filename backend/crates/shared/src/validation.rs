//! Validation Error - field-level input failures
//!
//! A [`ValidationError`] carries a banner message plus a `field → message`
//! map that the form templates render next to each input.

use std::collections::BTreeMap;

use thiserror::Error;

/// Banner text used when no more specific message is given
pub const DEFAULT_VALIDATION_MESSAGE: &str = "Please check the data you provided.";

/// 入力値検証エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
    errors: BTreeMap<String, String>,
}

impl Default for ValidationError {
    fn default() -> Self {
        Self {
            message: DEFAULT_VALIDATION_MESSAGE.to_string(),
            errors: BTreeMap::new(),
        }
    }
}

impl ValidationError {
    /// Empty error with the generic banner
    pub fn new() -> Self {
        Self::default()
    }

    /// Error with a custom banner and no field entries
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: BTreeMap::new(),
        }
    }

    /// Single-field error whose banner repeats the field message
    ///
    /// ```
    /// use kernel::validation::ValidationError;
    ///
    /// let err = ValidationError::single("current_password", "Current password is wrong");
    /// assert_eq!(err.message(), "Current password is wrong");
    /// assert_eq!(err.field("current_password"), Some("Current password is wrong"));
    /// ```
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::with_message(message.clone()).with_field(field, message)
    }

    /// Add (or replace) a field message
    pub fn with_field(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.errors.insert(field.into(), message.into());
        self
    }

    /// Add a field message only if the field has none yet
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// `tax_number` -> `Tax number`
fn humanize(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Fallback sentence for a rule without an explicit message
pub fn describe_rule(field: &str, code: &str) -> String {
    let label = humanize(field);
    match code {
        "required" => format!("{label} is required"),
        "email" => format!("{label} must be a valid email address"),
        "length" => format!("{label} has an invalid length"),
        "must_match" => format!("{label} does not match"),
        _ => format!("{label} is invalid"),
    }
}

#[cfg(feature = "validator")]
impl From<validator::ValidationErrors> for ValidationError {
    fn from(errs: validator::ValidationErrors) -> Self {
        let mut out = ValidationError::new();
        for (field, list) in errs.field_errors() {
            // A blank field reports "required" over its format rules
            let first = list
                .iter()
                .find(|e| e.code == "required")
                .or_else(|| list.first());
            if let Some(first) = first {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| describe_rule(&field, &first.code));
                out.push(field.to_string(), message);
            }
        }
        out
    }
}
