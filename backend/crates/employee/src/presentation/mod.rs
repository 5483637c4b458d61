//! Presentation Layer
//!
//! HTTP handlers, form DTOs, views, and router.

pub mod dto;
pub mod handlers;
pub mod router;
pub mod views;

pub use handlers::EmployeeAppState;
pub use router::{employee_router, employee_router_generic};
