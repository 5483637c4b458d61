//! Web Error Types
//!
//! [`WebError`] is what every page handler returns on failure. Turning it
//! into a response only records an [`ErrorReport`] in the response
//! extensions; the translator middleware decides wording and transport.

use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use kernel::validation::ValidationError;
use thiserror::Error;

/// Handler result
pub type WebResult<T> = Result<T, WebError>;

/// Failure taxonomy seen by the translator
#[derive(Debug, Error)]
pub enum WebError {
    /// Field-level input failure
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Classified failure with its own status and message
    #[error(transparent)]
    App(#[from] AppError),

    /// Anything else
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<validator::ValidationErrors> for WebError {
    fn from(errs: validator::ValidationErrors) -> Self {
        WebError::Validation(errs.into())
    }
}

/// Classification left in the response extensions for the translator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorReport {
    Validation {
        message: String,
        errors: BTreeMap<String, String>,
    },
    App {
        status: StatusCode,
        message: String,
    },
    /// `detail` is the full error chain, only shown outside production
    Internal { detail: String },
}

/// Shown instead of internal error text in production
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

impl ErrorReport {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::App { status, .. } => *status,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-facing message
    pub fn message(&self, production: bool) -> &str {
        match self {
            Self::Validation { message, .. } | Self::App { message, .. } => message,
            Self::Internal { .. } if production => GENERIC_ERROR_MESSAGE,
            Self::Internal { detail } => detail,
        }
    }

    pub fn errors(&self) -> BTreeMap<String, String> {
        match self {
            Self::Validation { errors, .. } => errors.clone(),
            _ => BTreeMap::new(),
        }
    }
}

impl WebError {
    fn log(&self) {
        match self {
            WebError::Validation(e) => {
                tracing::debug!(fields = e.errors().len(), "Validation failed");
            }
            WebError::App(e) if e.is_server_error() => {
                tracing::error!(error = ?e, "Request failed");
            }
            WebError::App(e) => {
                tracing::debug!(error = %e, "Request rejected");
            }
            WebError::Internal(e) => {
                tracing::error!(error = ?e, "Unhandled error");
            }
        }
    }

    pub fn report(&self) -> ErrorReport {
        match self {
            WebError::Validation(e) => ErrorReport::Validation {
                message: e.message().to_string(),
                errors: e.errors().clone(),
            },
            WebError::App(e) => ErrorReport::App {
                status: StatusCode::from_u16(e.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                message: e.message().to_string(),
            },
            WebError::Internal(e) => ErrorReport::Internal {
                detail: format!("{e:#}"),
            },
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        self.log();
        let report = self.report();
        // Safe default if the translator is not installed
        let mut response = (report.status(), report.message(true).to_string()).into_response();
        response.extensions_mut().insert(report);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_report() {
        let err: WebError = ValidationError::single("current_password", "Current password is wrong").into();
        let report = err.report();
        assert_eq!(report.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(report.message(true), "Current password is wrong");
        assert_eq!(
            report.errors().get("current_password").map(String::as_str),
            Some("Current password is wrong")
        );
    }

    #[test]
    fn test_app_report_keeps_status() {
        let err: WebError = AppError::not_found("Employee not found").into();
        let report = err.report();
        assert_eq!(report.status(), StatusCode::NOT_FOUND);
        assert_eq!(report.message(true), "Employee not found");
        assert!(report.errors().is_empty());
    }

    #[test]
    fn test_internal_message_depends_on_environment() {
        let err: WebError = anyhow::anyhow!("connection refused").into();
        let report = err.report();
        assert_eq!(report.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(report.message(true), GENERIC_ERROR_MESSAGE);
        assert_eq!(report.message(false), "connection refused");
    }

    #[test]
    fn test_into_response_attaches_report() {
        let response = WebError::from(AppError::conflict("Username already taken")).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert!(response.extensions().get::<ErrorReport>().is_some());
    }
}
