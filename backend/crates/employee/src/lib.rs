//! Employee Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Employees, allowances, value objects, repository traits
//! - `application/` - Use cases (list, show, create, update, delete, dashboard)
//! - `infra/` - Database implementations
//! - `presentation/` - Page handlers, form DTOs, views, router
//!
//! ## Features
//! - Employee CRUD with server-rendered forms
//! - Allowances replaced as a whole set on every update
//! - Dashboard counts by status
//!
//! Writes touching both tables run in one database transaction.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{EmployeeError, EmployeeResult};
pub use infra::postgres::PgEmployeeRepository;
pub use presentation::router::{employee_router, employee_router_generic};
