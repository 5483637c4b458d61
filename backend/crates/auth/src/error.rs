//! Auth Error Types
//!
//! Auth-specific failures. Classified variants map to a fixed status and
//! message through `kernel::error::AppError`; form-level ones become field
//! validation errors; the rest are internal.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::validation::ValidationError;
use platform::password::PasswordHashError;
use platform::token::TokenError;
use platform::upload::UploadError;
use thiserror::Error;
use web::WebError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// No user with that username or email
    #[error("User not found")]
    UserNotFound,

    /// Password does not match the stored hash
    #[error("Username or password wrong")]
    WrongPassword,

    /// Status is not ACTIVATED
    #[error("User is PENDING or SUSPENDED")]
    UserInactive,

    #[error("Username is already taken")]
    UsernameTaken,

    #[error("Email is already registered")]
    EmailTaken,

    /// Account update re-authentication failed
    #[error("Current password is wrong")]
    CurrentPasswordWrong,

    /// Rejected avatar file
    #[error("{0}")]
    InvalidAvatar(UploadError),

    /// Value object rejected an input that passed the form rules
    #[error("{0}")]
    InvalidInput(AppError),

    /// Hashing or stored-hash failure
    #[error("Password error: {0}")]
    Password(#[from] PasswordHashError),

    /// Token could not be signed
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// Avatar could not be written
    #[error("Upload error: {0}")]
    Upload(UploadError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<UploadError> for AuthError {
    fn from(err: UploadError) -> Self {
        if err.is_client_error() {
            AuthError::InvalidAvatar(err)
        } else {
            AuthError::Upload(err)
        }
    }
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::WrongPassword => ErrorKind::Unauthorized,
            AuthError::UserInactive => ErrorKind::Forbidden,
            AuthError::UsernameTaken | AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::CurrentPasswordWrong | AuthError::InvalidAvatar(_) => {
                ErrorKind::UnprocessableEntity
            }
            AuthError::InvalidInput(e) => e.kind(),
            AuthError::Password(_)
            | AuthError::Token(_)
            | AuthError::Upload(_)
            | AuthError::Database(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Password(e) => {
                tracing::error!(error = %e, "Password hashing error");
            }
            AuthError::Token(e) => {
                tracing::error!(error = %e, "Token signing error");
            }
            AuthError::Upload(e) => {
                tracing::error!(error = %e, "Avatar storage error");
            }
            AuthError::WrongPassword | AuthError::CurrentPasswordWrong => {
                tracing::warn!("Password mismatch");
            }
            AuthError::UserInactive => {
                tracing::warn!("Login attempt on inactive account");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AuthError> for WebError {
    fn from(err: AuthError) -> Self {
        err.log();
        match err {
            AuthError::CurrentPasswordWrong => {
                ValidationError::single("current_password", err.to_string()).into()
            }
            AuthError::InvalidAvatar(e) => ValidationError::single("avatar", e.to_string()).into(),
            AuthError::InvalidInput(e) => e.into(),
            AuthError::Database(e) => {
                // Constraint violations (duplicate username from a race) stay classified
                let app = AppError::from(e);
                if app.is_server_error() {
                    WebError::Internal(anyhow::Error::new(app))
                } else {
                    app.into()
                }
            }
            AuthError::Password(_) | AuthError::Token(_) | AuthError::Upload(_) => {
                WebError::Internal(anyhow::Error::new(err))
            }
            AuthError::UserNotFound
            | AuthError::WrongPassword
            | AuthError::UserInactive
            | AuthError::UsernameTaken
            | AuthError::EmailTaken => err.to_app_error().into(),
        }
    }
}
