//! Repository Traits
//!
//! Writes touching both `employees` and `employee_allowances` are one
//! transaction each: an implementation either applies all of it or nothing.

use kernel::id::EmployeeId;

use crate::domain::entities::{Allowance, DashboardStatistics, Employee, EmployeeDraft};
use crate::error::EmployeeResult;

/// Employee repository trait
#[trait_variant::make(EmployeeRepository: Send)]
pub trait LocalEmployeeRepository {
    /// All employees, newest first, with allowance counts
    async fn list(&self) -> EmployeeResult<Vec<Employee>>;

    async fn find_by_id(&self, id: EmployeeId) -> EmployeeResult<Option<Employee>>;

    async fn allowances(&self, id: EmployeeId) -> EmployeeResult<Vec<Allowance>>;

    /// Insert the employee and its allowances
    async fn create(&self, draft: &EmployeeDraft) -> EmployeeResult<Employee>;

    /// Overwrite the employee and replace all of its allowances
    ///
    /// `None` when the employee does not exist.
    async fn update(&self, id: EmployeeId, draft: &EmployeeDraft) -> EmployeeResult<Option<Employee>>;

    /// Delete the allowances and the employee; `false` when it did not exist
    async fn delete(&self, id: EmployeeId) -> EmployeeResult<bool>;

    async fn statistics(&self) -> EmployeeResult<DashboardStatistics>;
}
