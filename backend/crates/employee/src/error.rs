//! Employee Error Types
//!
//! Employee-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;
use web::WebError;

/// Employee-specific result type alias
pub type EmployeeResult<T> = Result<T, EmployeeError>;

/// Employee-specific error variants
#[derive(Debug, Error)]
pub enum EmployeeError {
    /// No row with the requested id
    #[error("Employee not found")]
    NotFound,

    /// Database error (transactions are already rolled back)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl EmployeeError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            EmployeeError::NotFound => ErrorKind::NotFound,
            EmployeeError::Database(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            EmployeeError::Database(e) => {
                tracing::error!(error = %e, "Employee database error");
            }
            EmployeeError::NotFound => {
                tracing::debug!("Employee not found");
            }
        }
    }
}

impl From<EmployeeError> for WebError {
    fn from(err: EmployeeError) -> Self {
        err.log();
        match err {
            EmployeeError::NotFound => err.to_app_error().into(),
            EmployeeError::Database(e) => {
                let app = AppError::from(e);
                if app.is_server_error() {
                    WebError::Internal(anyhow::Error::new(app))
                } else {
                    app.into()
                }
            }
        }
    }
}
