//! Sign In Use Case
//!
//! Verifies a username/email + password pair and issues an auth token.
//!
//! Checks run in a fixed order: existence, then status, then password. A
//! caller can therefore tell unknown users, inactive users and wrong
//! passwords apart.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeDelta, Utc};
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, Username};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    /// Username or email
    pub identifier: String,
    pub password: String,
    /// Extends the token lifetime to 30 days
    pub remember: bool,
}

/// Sign in output
pub struct SignInOutput {
    pub user: User,
    /// Signed JWT for the auth cookie
    pub token: String,
    /// Token lifetime, also the cookie Max-Age
    pub lifetime: Duration,
}

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SignInUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Resolve the identifier and check status and password
    pub async fn verify_credentials(&self, identifier: &str, password: &str) -> AuthResult<User> {
        let user = match Email::new(identifier) {
            Ok(email) => self.repo.find_by_email(&email).await?,
            Err(_) => match Username::new(identifier) {
                Ok(username) => self.repo.find_by_username(&username).await?,
                Err(_) => None,
            },
        };

        let user = user.ok_or(AuthError::UserNotFound)?;

        if !user.can_login() {
            return Err(AuthError::UserInactive);
        }

        let password = ClearTextPassword::new(password).map_err(|_| AuthError::WrongPassword)?;
        if !user.password.verify(&password) {
            return Err(AuthError::WrongPassword);
        }

        Ok(user)
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let user = self
            .verify_credentials(&input.identifier, &input.password)
            .await?;

        let lifetime = self.config.token_lifetime(input.remember);
        let expires_at =
            Utc::now() + TimeDelta::from_std(lifetime).unwrap_or_else(|_| TimeDelta::hours(2));
        let token = self.config.signer.issue(user.id.get(), expires_at)?;

        tracing::info!(
            user_id = %user.id,
            remember = input.remember,
            "User signed in"
        );

        Ok(SignInOutput {
            user,
            token,
            lifetime,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::UserStatus;
    use crate::infra::memory::{MemoryUserRepository, test_config};

    async fn setup(status: UserStatus) -> SignInUseCase<MemoryUserRepository> {
        let repo = MemoryUserRepository::default();
        repo.insert_user("Admin", "admin", "admin@example.com", "secret", status)
            .await;
        SignInUseCase::new(Arc::new(repo), Arc::new(test_config()))
    }

    #[tokio::test]
    async fn test_verify_by_username_and_email() {
        let use_case = setup(UserStatus::Activated).await;

        let user = use_case.verify_credentials("admin", "secret").await.unwrap();
        assert_eq!(user.username.as_str(), "admin");

        let user = use_case
            .verify_credentials("Admin@Example.com", "secret")
            .await
            .unwrap();
        assert_eq!(user.email.as_str(), "admin@example.com");
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let use_case = setup(UserStatus::Activated).await;
        assert!(matches!(
            use_case.verify_credentials("nobody", "secret").await,
            Err(AuthError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_inactive_user_checked_before_password() {
        for status in [UserStatus::Pending, UserStatus::Suspended] {
            let use_case = setup(status).await;
            assert!(matches!(
                use_case.verify_credentials("admin", "not-the-password").await,
                Err(AuthError::UserInactive)
            ));
        }
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let use_case = setup(UserStatus::Activated).await;
        assert!(matches!(
            use_case.verify_credentials("admin", "wrong").await,
            Err(AuthError::WrongPassword)
        ));
    }

    #[tokio::test]
    async fn test_execute_issues_token_for_user() {
        let use_case = setup(UserStatus::Activated).await;
        let output = use_case
            .execute(SignInInput {
                identifier: "admin".to_string(),
                password: "secret".to_string(),
                remember: true,
            })
            .await
            .unwrap();

        assert_eq!(output.lifetime, Duration::from_secs(30 * 24 * 3600));
        let subject = use_case.config.signer.validate(&output.token).unwrap();
        assert_eq!(subject, output.user.id.get());
    }
}
