//! Domain Entities

use chrono::NaiveDate;
use kernel::id::EmployeeId;

use crate::domain::value_objects::{EmployeeStatus, Gender};

/// Row of `employees`
///
/// Every column but `name` is nullable; unknown enum text reads as `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub email: Option<String>,
    pub tax_number: Option<String>,
    pub gender: Option<Gender>,
    pub hired_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub status: Option<EmployeeStatus>,
    /// Number of `employee_allowances` rows
    pub total_allowance: i64,
}

impl Employee {
    /// Stored form of a saved draft
    pub fn from_draft(id: EmployeeId, draft: &EmployeeDraft) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            email: Some(draft.email.clone()),
            tax_number: Some(draft.tax_number.clone()),
            gender: Some(draft.gender),
            hired_date: Some(draft.hired_date),
            address: Some(draft.address.clone()),
            status: Some(draft.status),
            total_allowance: draft.allowances.len() as i64,
        }
    }
}

/// Row of `employee_allowances`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allowance {
    pub id: i64,
    pub employee_id: EmployeeId,
    pub allowance: String,
}

/// Employee with its allowances
#[derive(Debug, Clone)]
pub struct EmployeeDetail {
    pub employee: Employee,
    pub allowances: Vec<Allowance>,
}

impl EmployeeDetail {
    pub fn allowance_labels(&self) -> Vec<String> {
        self.allowances.iter().map(|a| a.allowance.clone()).collect()
    }
}

/// Validated employee fields written by create and update
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeDraft {
    pub name: String,
    pub email: String,
    pub tax_number: String,
    pub gender: Gender,
    pub hired_date: NaiveDate,
    pub address: String,
    pub status: EmployeeStatus,
    /// Non-blank labels, in submission order
    pub allowances: Vec<String>,
}

/// Employee counts shown on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStatistics {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
    pub pending: i64,
}
