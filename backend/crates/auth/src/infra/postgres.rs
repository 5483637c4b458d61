//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;
use sqlx::PgPool;

use crate::domain::entity::{AccountChanges, NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, UserStatus, UserType, Username};
use crate::error::AuthResult;

const USER_COLUMNS: &str = r#"
    id,
    name,
    username,
    email,
    password,
    status,
    user_type,
    avatar,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_where(&self, condition: &str, value: &str) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {condition}");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.fetch_one_where("LOWER(email) = $1", email.as_str()).await
    }

    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<User>> {
        self.fetch_one_where("username = $1", username.as_str()).await
    }

    async fn exists_by_username(&self, username: &Username, except: Option<UserId>) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
        )
        .bind(username.as_str())
        .bind(except.map(|id| id.get()))
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_email(&self, email: &Email, except: Option<UserId>) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
        )
        .bind(email.as_str())
        .bind(except.map(|id| id.get()))
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let sql = format!(
            r#"
            INSERT INTO users (name, username, email, password, status, user_type)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(&user.name)
            .bind(user.username.as_str())
            .bind(user.email.as_str())
            .bind(user.password.as_phc_string())
            .bind(user.status.code())
            .bind(user.user_type.code())
            .fetch_one(&self.pool)
            .await?;

        let user = row.into_user()?;
        tracing::debug!(user_id = %user.id, "User row inserted");
        Ok(user)
    }

    async fn update_account(&self, id: UserId, changes: &AccountChanges) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                username = $3,
                email = $4,
                password = COALESCE($5, password),
                avatar = COALESCE($6, avatar),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .bind(&changes.name)
        .bind(changes.username.as_str())
        .bind(changes.email.as_str())
        .bind(changes.password.as_ref().map(HashedPassword::as_phc_string))
        .bind(changes.avatar.as_deref())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    username: String,
    email: String,
    password: String,
    status: String,
    user_type: String,
    avatar: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        Ok(User {
            id: UserId::new(self.id),
            name: self.name,
            username: Username::from_db(self.username),
            email: Email::from_db(self.email),
            password: HashedPassword::from_phc_string(self.password)?,
            // Unknown codes lock the account rather than fail the query
            status: UserStatus::from_code(&self.status).unwrap_or(UserStatus::Suspended),
            user_type: UserType::from_code(&self.user_type).unwrap_or_default(),
            avatar: self.avatar.filter(|a| !a.is_empty()),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
