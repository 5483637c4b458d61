//! Create Employee Use Case

use std::sync::Arc;

use crate::domain::entities::{Employee, EmployeeDraft};
use crate::domain::repository::EmployeeRepository;
use crate::error::EmployeeResult;

pub struct CreateEmployeeUseCase<R>
where
    R: EmployeeRepository,
{
    repo: Arc<R>,
}

impl<R> CreateEmployeeUseCase<R>
where
    R: EmployeeRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, draft: EmployeeDraft) -> EmployeeResult<Employee> {
        let employee = self.repo.create(&draft).await?;

        tracing::info!(
            employee_id = %employee.id,
            allowances = draft.allowances.len(),
            "Employee created"
        );

        Ok(employee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::{MemoryEmployeeRepository, draft};

    #[tokio::test]
    async fn test_creates_employee_with_allowances() {
        let repo = Arc::new(MemoryEmployeeRepository::default());
        let use_case = CreateEmployeeUseCase::new(repo.clone());

        let employee = use_case
            .execute(draft("Ann", &["Meal", "Transport"]))
            .await
            .unwrap();

        let labels: Vec<_> = repo
            .allowances(employee.id)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.allowance)
            .collect();
        assert_eq!(labels, vec!["Meal", "Transport"]);
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let repo = Arc::new(MemoryEmployeeRepository::default());

        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let use_case = CreateEmployeeUseCase::new(repo.clone());
                tokio::spawn(async move { use_case.execute(draft(&format!("E{i}"), &["Meal"])).await })
            })
            .collect();

        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await.unwrap().unwrap().id);
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 8);

        for id in ids {
            assert!(repo.find_by_id(id).await.unwrap().is_some());
        }
    }
}
