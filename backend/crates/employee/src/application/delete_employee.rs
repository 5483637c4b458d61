//! Delete Employee Use Case

use std::sync::Arc;

use kernel::id::EmployeeId;

use crate::domain::repository::EmployeeRepository;
use crate::error::{EmployeeError, EmployeeResult};

pub struct DeleteEmployeeUseCase<R>
where
    R: EmployeeRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteEmployeeUseCase<R>
where
    R: EmployeeRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: EmployeeId) -> EmployeeResult<()> {
        if !self.repo.delete(id).await? {
            return Err(EmployeeError::NotFound);
        }

        tracing::info!(employee_id = %id, "Employee deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ShowEmployeeUseCase;
    use crate::infra::memory::{MemoryEmployeeRepository, draft};

    #[tokio::test]
    async fn test_delete_then_show_is_not_found() {
        let repo = Arc::new(MemoryEmployeeRepository::default());
        let created = repo.create(&draft("Ann", &["Meal"])).await.unwrap();

        DeleteEmployeeUseCase::new(repo.clone())
            .execute(created.id)
            .await
            .unwrap();

        assert!(repo.allowances(created.id).await.unwrap().is_empty());
        let shown = ShowEmployeeUseCase::new(repo.clone()).execute(created.id).await;
        assert!(matches!(shown, Err(EmployeeError::NotFound)));

        let again = DeleteEmployeeUseCase::new(repo).execute(created.id).await;
        assert!(matches!(again, Err(EmployeeError::NotFound)));
    }
}
