//! Update Employee Use Case
//!
//! Overwrites the employee and replaces its allowance set with exactly the
//! submitted list.

use std::sync::Arc;

use kernel::id::EmployeeId;

use crate::domain::entities::{Employee, EmployeeDraft};
use crate::domain::repository::EmployeeRepository;
use crate::error::{EmployeeError, EmployeeResult};

pub struct UpdateEmployeeUseCase<R>
where
    R: EmployeeRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateEmployeeUseCase<R>
where
    R: EmployeeRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: EmployeeId, draft: EmployeeDraft) -> EmployeeResult<Employee> {
        let employee = self
            .repo
            .update(id, &draft)
            .await?
            .ok_or(EmployeeError::NotFound)?;

        tracing::info!(
            employee_id = %id,
            allowances = draft.allowances.len(),
            "Employee updated"
        );

        Ok(employee)
    }
}
