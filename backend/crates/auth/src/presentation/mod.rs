//! Presentation Layer
//!
//! HTTP handlers, form DTOs, views, router, and route guards.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod views;

pub use handlers::AuthAppState;
pub use middleware::{require_auth, require_guest};
pub use router::auth_routes;
