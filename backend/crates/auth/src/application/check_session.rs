//! Check Session Use Case
//!
//! Resolves an auth token to the user it was issued for.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;

/// Check session use case
pub struct CheckSessionUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> CheckSessionUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// `Ok(None)` for an invalid/expired token or a user that no longer exists
    pub async fn execute(&self, token: &str) -> AuthResult<Option<User>> {
        let user_id = match self.config.signer.validate(token) {
            Ok(id) => UserId::new(id),
            Err(e) => {
                tracing::debug!(error = %e, "Rejected auth token");
                return Ok(None);
            }
        };

        self.repo.find_by_id(user_id).await
    }
}
