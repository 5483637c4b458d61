//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Users, value objects, repository traits
//! - `application/` - Use cases (sign in, sign up, session check, account update)
//! - `infra/` - Database implementations
//! - `presentation/` - Page handlers, form DTOs, views, router, guards
//!
//! ## Features
//! - Login with username or email + password, optional "remember me"
//! - Self-registration (ACTIVATED, EXTERNAL users)
//! - Account page with avatar upload and password change
//! - `require_auth` / `require_guest` guards for other page routers
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - Stateless HS256 JWT carried in an HttpOnly cookie (bearer header fallback)
//! - Status checked before the password: PENDING/SUSPENDED users never sign in

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::handlers::AuthAppState;
pub use presentation::middleware::{require_auth, require_guest};
pub use presentation::router::auth_routes;
