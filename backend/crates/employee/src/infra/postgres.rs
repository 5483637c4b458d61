//! PostgreSQL Repository Implementation
//!
//! Multi-statement writes run in one transaction. Returning early drops the
//! `Transaction`, which rolls it back; commit is always the last step.

use chrono::NaiveDate;
use kernel::id::EmployeeId;
use sqlx::{PgConnection, PgPool};

use crate::domain::entities::{Allowance, DashboardStatistics, Employee, EmployeeDraft};
use crate::domain::repository::EmployeeRepository;
use crate::domain::value_objects::{EmployeeStatus, Gender};
use crate::error::EmployeeResult;

/// PostgreSQL-backed employee repository
#[derive(Clone)]
pub struct PgEmployeeRepository {
    pool: PgPool,
}

impl PgEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Bulk insert of allowance labels for one employee
async fn insert_allowances(
    conn: &mut PgConnection,
    employee_id: i64,
    allowances: &[String],
) -> EmployeeResult<()> {
    if allowances.is_empty() {
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO employee_allowances (employee_id, allowance)
        SELECT $1, label FROM UNNEST($2::TEXT[]) WITH ORDINALITY AS t(label, position)
        ORDER BY position
        "#,
    )
    .bind(employee_id)
    .bind(allowances)
    .execute(conn)
    .await?;

    Ok(())
}

impl EmployeeRepository for PgEmployeeRepository {
    async fn list(&self) -> EmployeeResult<Vec<Employee>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT
                id, name, email, tax_number, gender, hired_date, address, status,
                (SELECT COUNT(*) FROM employee_allowances WHERE employee_id = employees.id) AS total_allowance
            FROM employees
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(EmployeeRow::into_employee).collect())
    }

    async fn find_by_id(&self, id: EmployeeId) -> EmployeeResult<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT
                id, name, email, tax_number, gender, hired_date, address, status,
                (SELECT COUNT(*) FROM employee_allowances WHERE employee_id = employees.id) AS total_allowance
            FROM employees
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(EmployeeRow::into_employee))
    }

    async fn allowances(&self, id: EmployeeId) -> EmployeeResult<Vec<Allowance>> {
        let rows = sqlx::query_as::<_, AllowanceRow>(
            "SELECT id, employee_id, allowance FROM employee_allowances WHERE employee_id = $1 ORDER BY id",
        )
        .bind(id.get())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AllowanceRow::into_allowance).collect())
    }

    async fn create(&self, draft: &EmployeeDraft) -> EmployeeResult<Employee> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO employees (name, email, tax_number, gender, hired_date, address, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.email)
        .bind(&draft.tax_number)
        .bind(draft.gender.code())
        .bind(draft.hired_date)
        .bind(&draft.address)
        .bind(draft.status.code())
        .fetch_one(&mut *tx)
        .await?;

        insert_allowances(&mut tx, id, &draft.allowances).await?;
        tx.commit().await?;

        Ok(Employee::from_draft(EmployeeId::new(id), draft))
    }

    async fn update(&self, id: EmployeeId, draft: &EmployeeDraft) -> EmployeeResult<Option<Employee>> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE employees SET
                name = $2,
                email = $3,
                tax_number = $4,
                gender = $5,
                hired_date = $6,
                address = $7,
                status = $8,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .bind(&draft.name)
        .bind(&draft.email)
        .bind(&draft.tax_number)
        .bind(draft.gender.code())
        .bind(draft.hired_date)
        .bind(&draft.address)
        .bind(draft.status.code())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            return Ok(None);
        }

        sqlx::query("DELETE FROM employee_allowances WHERE employee_id = $1")
            .bind(id.get())
            .execute(&mut *tx)
            .await?;
        insert_allowances(&mut tx, id.get(), &draft.allowances).await?;

        tx.commit().await?;

        Ok(Some(Employee::from_draft(id, draft)))
    }

    async fn delete(&self, id: EmployeeId) -> EmployeeResult<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM employee_allowances WHERE employee_id = $1")
            .bind(id.get())
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id.get())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }

    async fn statistics(&self) -> EmployeeResult<DashboardStatistics> {
        let row = sqlx::query_as::<_, StatisticsRow>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'ACTIVE') AS active,
                COUNT(*) FILTER (WHERE status = 'INACTIVE') AS inactive,
                COUNT(*) FILTER (WHERE status = 'PENDING') AS pending
            FROM employees
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(DashboardStatistics {
            total: row.total,
            active: row.active,
            inactive: row.inactive,
            pending: row.pending,
        })
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct EmployeeRow {
    id: i64,
    name: String,
    email: Option<String>,
    tax_number: Option<String>,
    gender: Option<String>,
    hired_date: Option<NaiveDate>,
    address: Option<String>,
    status: Option<String>,
    total_allowance: i64,
}

impl EmployeeRow {
    fn into_employee(self) -> Employee {
        Employee {
            id: EmployeeId::new(self.id),
            name: self.name,
            email: self.email,
            tax_number: self.tax_number,
            gender: self.gender.as_deref().and_then(Gender::from_code),
            hired_date: self.hired_date,
            address: self.address,
            status: self.status.as_deref().and_then(EmployeeStatus::from_code),
            total_allowance: self.total_allowance,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AllowanceRow {
    id: i64,
    employee_id: i64,
    allowance: String,
}

impl AllowanceRow {
    fn into_allowance(self) -> Allowance {
        Allowance {
            id: self.id,
            employee_id: EmployeeId::new(self.employee_id),
            allowance: self.allowance,
        }
    }
}

#[derive(sqlx::FromRow)]
struct StatisticsRow {
    total: i64,
    active: i64,
    inactive: i64,
    pending: i64,
}
