//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;
use web::Principal;

use crate::domain::value_object::{Email, UserStatus, UserType, Username};

/// Row of `users`
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub username: Username,
    pub email: Email,
    /// Argon2id PHC string
    pub password: HashedPassword,
    pub status: UserStatus,
    pub user_type: UserType,
    /// Relative to the upload directory
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn can_login(&self) -> bool {
        self.status.can_login()
    }

    /// Request-scoped view handed to page handlers
    pub fn to_principal(&self) -> Principal {
        Principal {
            id: self.id,
            name: self.name.clone(),
            username: self.username.to_string(),
            email: self.email.to_string(),
            avatar: self.avatar.clone(),
        }
    }
}

/// User about to be inserted
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub username: Username,
    pub email: Email,
    pub password: HashedPassword,
    pub status: UserStatus,
    pub user_type: UserType,
}

impl NewUser {
    /// Self-registration: activated immediately, external type
    pub fn registration(name: String, username: Username, email: Email, password: HashedPassword) -> Self {
        Self {
            name,
            username,
            email,
            password,
            status: UserStatus::Activated,
            user_type: UserType::External,
        }
    }
}

/// Fields written by an account update
///
/// `password` and `avatar` are only replaced when present.
#[derive(Debug, Clone)]
pub struct AccountChanges {
    pub name: String,
    pub username: Username,
    pub email: Email,
    pub password: Option<HashedPassword>,
    pub avatar: Option<String>,
}

impl AccountChanges {
    /// Apply to an in-memory copy (what the database row becomes)
    pub fn apply_to(&self, user: &mut User) {
        user.name = self.name.clone();
        user.username = self.username.clone();
        user.email = self.email.clone();
        if let Some(password) = &self.password {
            user.password = password.clone();
        }
        if let Some(avatar) = &self.avatar {
            user.avatar = Some(avatar.clone());
        }
        user.updated_at = Utc::now();
    }
}
