//! Show Employee Use Case
//!
//! Loads an employee together with its allowances.

use std::sync::Arc;

use kernel::id::EmployeeId;

use crate::domain::entities::EmployeeDetail;
use crate::domain::repository::EmployeeRepository;
use crate::error::{EmployeeError, EmployeeResult};

pub struct ShowEmployeeUseCase<R>
where
    R: EmployeeRepository,
{
    repo: Arc<R>,
}

impl<R> ShowEmployeeUseCase<R>
where
    R: EmployeeRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: EmployeeId) -> EmployeeResult<EmployeeDetail> {
        let mut employee = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(EmployeeError::NotFound)?;
        let allowances = self.repo.allowances(id).await?;
        employee.total_allowance = allowances.len() as i64;

        Ok(EmployeeDetail {
            employee,
            allowances,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::{MemoryEmployeeRepository, draft};

    #[tokio::test]
    async fn test_detail_includes_allowances() {
        let repo = Arc::new(MemoryEmployeeRepository::default());
        let created = repo.create(&draft("Ann", &["Meal", "Transport"])).await.unwrap();

        let detail = ShowEmployeeUseCase::new(repo).execute(created.id).await.unwrap();
        assert_eq!(detail.employee.name, "Ann");
        assert_eq!(detail.allowance_labels(), vec!["Meal", "Transport"]);
        assert_eq!(detail.employee.total_allowance, 2);
    }

    #[tokio::test]
    async fn test_missing_employee() {
        let repo = Arc::new(MemoryEmployeeRepository::default());
        let result = ShowEmployeeUseCase::new(repo).execute(EmployeeId::new(99)).await;
        assert!(matches!(result, Err(EmployeeError::NotFound)));
    }
}
