//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;

use crate::domain::entity::{AccountChanges, NewUser, User};
use crate::domain::value_object::{Email, Username};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>>;

    /// Find user by email (case-insensitive)
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<User>>;

    /// Check if a username is taken, optionally ignoring one user
    async fn exists_by_username(&self, username: &Username, except: Option<UserId>) -> AuthResult<bool>;

    /// Check if an email is taken, optionally ignoring one user
    async fn exists_by_email(&self, email: &Email, except: Option<UserId>) -> AuthResult<bool>;

    /// Insert a user and return the stored row
    async fn create(&self, user: &NewUser) -> AuthResult<User>;

    /// Overwrite the account fields of a user
    async fn update_account(&self, id: UserId, changes: &AccountChanges) -> AuthResult<()>;
}
