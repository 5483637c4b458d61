//! In-memory employee repository for use-case and router tests

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use kernel::id::EmployeeId;

use crate::domain::entities::{Allowance, DashboardStatistics, Employee, EmployeeDraft};
use crate::domain::repository::EmployeeRepository;
use crate::domain::value_objects::{EmployeeStatus, Gender};
use crate::error::EmployeeResult;

#[derive(Default)]
struct Tables {
    employees: Vec<Employee>,
    allowances: Vec<Allowance>,
    next_employee_id: i64,
    next_allowance_id: i64,
}

impl Tables {
    fn replace_allowances(&mut self, employee_id: EmployeeId, labels: &[String]) {
        self.allowances.retain(|a| a.employee_id != employee_id);
        for label in labels {
            self.next_allowance_id += 1;
            self.allowances.push(Allowance {
                id: self.next_allowance_id,
                employee_id,
                allowance: label.clone(),
            });
        }
    }

    fn count(&self, employee_id: EmployeeId) -> i64 {
        self.allowances
            .iter()
            .filter(|a| a.employee_id == employee_id)
            .count() as i64
    }
}

/// Clones share the same tables
#[derive(Clone, Default)]
pub struct MemoryEmployeeRepository {
    tables: Arc<Mutex<Tables>>,
}

impl EmployeeRepository for MemoryEmployeeRepository {
    async fn list(&self) -> EmployeeResult<Vec<Employee>> {
        let tables = self.tables.lock().unwrap();
        let mut employees: Vec<Employee> = tables
            .employees
            .iter()
            .map(|e| Employee {
                total_allowance: tables.count(e.id),
                ..e.clone()
            })
            .collect();
        employees.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(employees)
    }

    async fn find_by_id(&self, id: EmployeeId) -> EmployeeResult<Option<Employee>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.employees.iter().find(|e| e.id == id).cloned())
    }

    async fn allowances(&self, id: EmployeeId) -> EmployeeResult<Vec<Allowance>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .allowances
            .iter()
            .filter(|a| a.employee_id == id)
            .cloned()
            .collect())
    }

    async fn create(&self, draft: &EmployeeDraft) -> EmployeeResult<Employee> {
        let mut tables = self.tables.lock().unwrap();
        tables.next_employee_id += 1;
        let employee = Employee::from_draft(EmployeeId::new(tables.next_employee_id), draft);
        tables.employees.push(employee.clone());
        tables.replace_allowances(employee.id, &draft.allowances);
        Ok(employee)
    }

    async fn update(&self, id: EmployeeId, draft: &EmployeeDraft) -> EmployeeResult<Option<Employee>> {
        let mut tables = self.tables.lock().unwrap();
        let Some(slot) = tables.employees.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        *slot = Employee::from_draft(id, draft);
        let employee = slot.clone();
        tables.replace_allowances(id, &draft.allowances);
        Ok(Some(employee))
    }

    async fn delete(&self, id: EmployeeId) -> EmployeeResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.employees.len();
        tables.employees.retain(|e| e.id != id);
        if tables.employees.len() == before {
            return Ok(false);
        }
        tables.allowances.retain(|a| a.employee_id != id);
        Ok(true)
    }

    async fn statistics(&self) -> EmployeeResult<DashboardStatistics> {
        let tables = self.tables.lock().unwrap();
        let count = |status| tables.employees.iter().filter(|e| e.status == Some(status)).count() as i64;
        Ok(DashboardStatistics {
            total: tables.employees.len() as i64,
            active: count(EmployeeStatus::Active),
            inactive: count(EmployeeStatus::Inactive),
            pending: count(EmployeeStatus::Pending),
        })
    }
}

/// Active employee draft with the given allowances
pub fn draft(name: &str, allowances: &[&str]) -> EmployeeDraft {
    EmployeeDraft {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        tax_number: "TX-001".to_string(),
        gender: Gender::Female,
        hired_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        address: "Main street 1".to_string(),
        status: EmployeeStatus::Active,
        allowances: allowances.iter().map(|s| s.to_string()).collect(),
    }
}
