//! Application Layer
//!
//! Use cases. Each holds its repository behind an `Arc` and is built per
//! request by the handlers.

pub mod create_employee;
pub mod dashboard;
pub mod delete_employee;
pub mod list_employees;
pub mod show_employee;
pub mod update_employee;

// Re-exports
pub use create_employee::CreateEmployeeUseCase;
pub use dashboard::DashboardUseCase;
pub use delete_employee::DeleteEmployeeUseCase;
pub use list_employees::ListEmployeesUseCase;
pub use show_employee::ShowEmployeeUseCase;
pub use update_employee::UpdateEmployeeUseCase;
