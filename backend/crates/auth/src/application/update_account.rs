//! Update Account Use Case
//!
//! Re-authenticates with the current password, then overwrites name,
//! username and email. The password is re-hashed only when a new one is
//! given; the avatar is replaced only when a file is uploaded.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserId;
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::{AccountChanges, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, Username};
use crate::error::{AuthError, AuthResult};

/// Uploaded avatar file
pub struct AvatarUpload {
    /// Client-supplied name, sanitized before use
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Update account input (already validated by the form rules)
pub struct UpdateAccountInput {
    pub user_id: UserId,
    pub name: String,
    pub username: String,
    pub email: String,
    pub current_password: String,
    /// Empty means "keep the current password"
    pub password: String,
    pub avatar: Option<AvatarUpload>,
}

/// Update account use case
pub struct UpdateAccountUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> UpdateAccountUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: UpdateAccountInput) -> AuthResult<User> {
        let mut user = self
            .repo
            .find_by_id(input.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let current = ClearTextPassword::new(&input.current_password)
            .map_err(|_| AuthError::CurrentPasswordWrong)?;
        if !user.password.verify(&current) {
            return Err(AuthError::CurrentPasswordWrong);
        }

        let username = Username::new(&input.username).map_err(AuthError::InvalidInput)?;
        let email = Email::new(&input.email).map_err(AuthError::InvalidInput)?;

        if self.repo.exists_by_username(&username, Some(user.id)).await? {
            return Err(AuthError::UsernameTaken);
        }
        if self.repo.exists_by_email(&email, Some(user.id)).await? {
            return Err(AuthError::EmailTaken);
        }

        let password = if input.password.is_empty() {
            None
        } else {
            Some(ClearTextPassword::new(&input.password)?.hash()?)
        };

        let avatar = match &input.avatar {
            Some(upload) => Some(
                self.config
                    .uploads
                    .store_avatar(&upload.file_name, &upload.bytes, Utc::now())
                    .await?,
            ),
            None => None,
        };

        let changes = AccountChanges {
            name: input.name.trim().to_string(),
            username,
            email,
            password,
            avatar,
        };
        if let Err(err) = self.repo.update_account(user.id, &changes).await {
            if let Some(path) = &changes.avatar {
                if let Err(e) = self.config.uploads.remove(path).await {
                    tracing::warn!(path = %path, error = %e, "Failed to remove orphaned avatar");
                }
            }
            return Err(err);
        }
        changes.apply_to(&mut user);

        tracing::info!(
            user_id = %user.id,
            password_changed = changes.password.is_some(),
            avatar_changed = changes.avatar.is_some(),
            "Account updated"
        );

        Ok(user)
    }
}
