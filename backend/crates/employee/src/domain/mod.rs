//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entities;
pub mod repository;
pub mod value_objects;

// Re-exports
pub use entities::{Allowance, DashboardStatistics, Employee, EmployeeDetail, EmployeeDraft};
pub use repository::EmployeeRepository;
pub use value_objects::{EmployeeStatus, Gender};
