//! In-memory user repository for use-case and router tests

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use kernel::id::UserId;
use platform::password::ClearTextPassword;
use platform::upload::UploadStore;

use crate::application::config::AuthConfig;
use crate::domain::entity::{AccountChanges, NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, UserStatus, UserType, Username};
use crate::error::{AuthError, AuthResult};

/// Clones share the same rows
#[derive(Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<Mutex<Vec<User>>>,
    fail_updates: Arc<AtomicBool>,
}

impl MemoryUserRepository {
    /// Seed a user with a freshly hashed password
    pub async fn insert_user(
        &self,
        name: &str,
        username: &str,
        email: &str,
        password: &str,
        status: UserStatus,
    ) -> User {
        let mut new_user = NewUser::registration(
            name.to_string(),
            Username::new(username).unwrap(),
            Email::new(email).unwrap(),
            ClearTextPassword::new(password).unwrap().hash().unwrap(),
        );
        new_user.status = status;
        new_user.user_type = UserType::Internal;
        self.create(&new_user).await.unwrap()
    }

    /// Make every later `update_account` fail like a lost connection
    pub fn fail_updates(&self) {
        self.fail_updates.store(true, Ordering::SeqCst);
    }

    fn find(&self, pred: impl Fn(&User) -> bool) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| pred(u)).cloned()
    }

    fn any(&self, except: Option<UserId>, pred: impl Fn(&User) -> bool) -> bool {
        self.users
            .lock()
            .unwrap()
            .iter()
            .any(|u| Some(u.id) != except && pred(u))
    }
}

impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        Ok(self.find(|u| u.id == id))
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self.find(|u| u.email == *email))
    }

    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<User>> {
        Ok(self.find(|u| u.username == *username))
    }

    async fn exists_by_username(&self, username: &Username, except: Option<UserId>) -> AuthResult<bool> {
        Ok(self.any(except, |u| u.username == *username))
    }

    async fn exists_by_email(&self, email: &Email, except: Option<UserId>) -> AuthResult<bool> {
        Ok(self.any(except, |u| u.email == *email))
    }

    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let mut users = self.users.lock().unwrap();
        let now = Utc::now();
        let stored = User {
            id: UserId::new(users.len() as i64 + 1),
            name: user.name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            status: user.status,
            user_type: user.user_type,
            avatar: None,
            created_at: now,
            updated_at: now,
        };
        users.push(stored.clone());
        Ok(stored)
    }

    async fn update_account(&self, id: UserId, changes: &AccountChanges) -> AuthResult<()> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(AuthError::Database(sqlx::Error::PoolTimedOut));
        }
        if let Some(user) = self.users.lock().unwrap().iter_mut().find(|u| u.id == id) {
            changes.apply_to(user);
        }
        Ok(())
    }
}

pub fn test_config() -> AuthConfig {
    AuthConfig::with_random_secret(UploadStore::new(std::env::temp_dir()))
}

pub fn test_config_with_uploads(root: &Path) -> AuthConfig {
    AuthConfig::with_random_secret(UploadStore::new(root))
}
