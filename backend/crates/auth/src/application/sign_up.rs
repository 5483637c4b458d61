//! Sign Up Use Case
//!
//! Registers a self-service user (ACTIVATED, EXTERNAL).

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::domain::entity::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, Username};
use crate::error::{AuthError, AuthResult};

/// Sign up input (already validated by the form rules)
pub struct SignUpInput {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Sign up use case
pub struct SignUpUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> SignUpUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<User> {
        let username = Username::new(&input.username).map_err(AuthError::InvalidInput)?;
        let email = Email::new(&input.email).map_err(AuthError::InvalidInput)?;

        if self.repo.exists_by_username(&username, None).await? {
            return Err(AuthError::UsernameTaken);
        }
        if self.repo.exists_by_email(&email, None).await? {
            return Err(AuthError::EmailTaken);
        }

        let password = ClearTextPassword::new(&input.password)?.hash()?;

        let user = self
            .repo
            .create(&NewUser::registration(
                input.name.trim().to_string(),
                username,
                email,
                password,
            ))
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{UserStatus, UserType};
    use crate::infra::memory::MemoryUserRepository;
    use platform::password::ClearTextPassword;

    fn input(username: &str, email: &str) -> SignUpInput {
        SignUpInput {
            name: "Jane Doe".to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_creates_activated_external_user() {
        let use_case = SignUpUseCase::new(Arc::new(MemoryUserRepository::default()));
        let user = use_case.execute(input("jane", "jane@example.com")).await.unwrap();

        assert_eq!(user.status, UserStatus::Activated);
        assert_eq!(user.user_type, UserType::External);
        assert_ne!(user.password.as_phc_string(), "secret");
        assert!(user.password.verify(&ClearTextPassword::new("secret").unwrap()));
    }

    #[tokio::test]
    async fn test_sign_up_rejects_duplicates() {
        let use_case = SignUpUseCase::new(Arc::new(MemoryUserRepository::default()));
        use_case.execute(input("jane", "jane@example.com")).await.unwrap();

        assert!(matches!(
            use_case.execute(input("jane", "other@example.com")).await,
            Err(AuthError::UsernameTaken)
        ));
        assert!(matches!(
            use_case.execute(input("other", "JANE@example.com")).await,
            Err(AuthError::EmailTaken)
        ));
    }
}
