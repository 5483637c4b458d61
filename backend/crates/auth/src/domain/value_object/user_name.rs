//! Username Value Object
//!
//! Public handle used to log in. Only `[A-Za-z0-9._-]` is allowed; case is
//! preserved. Length limits differ between forms (3-20 on registration,
//! up to 50 on the login form) and are checked there.

use std::fmt;

use kernel::error::app_error::{AppError, AppResult};

/// True when every character is in `[A-Za-z0-9._-]` and the value is non-empty
pub fn is_valid_username(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let value = raw.as_ref().trim();
        if !is_valid_username(value) {
            return Err(AppError::bad_request(
                "Username may only contain letters, numbers, dots, underscores and dashes",
            ));
        }
        Ok(Self(value.to_string()))
    }

    /// Value read back from `users.username`
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
