//! Dashboard Use Case
//!
//! Employee counts per status.

use std::sync::Arc;

use crate::domain::entities::DashboardStatistics;
use crate::domain::repository::EmployeeRepository;
use crate::error::EmployeeResult;

pub struct DashboardUseCase<R>
where
    R: EmployeeRepository,
{
    repo: Arc<R>,
}

impl<R> DashboardUseCase<R>
where
    R: EmployeeRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> EmployeeResult<DashboardStatistics> {
        self.repo.statistics().await
    }
}
