//! List Employees Use Case

use std::sync::Arc;

use crate::domain::entities::Employee;
use crate::domain::repository::EmployeeRepository;
use crate::error::EmployeeResult;

pub struct ListEmployeesUseCase<R>
where
    R: EmployeeRepository,
{
    repo: Arc<R>,
}

impl<R> ListEmployeesUseCase<R>
where
    R: EmployeeRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> EmployeeResult<Vec<Employee>> {
        self.repo.list().await
    }
}
