//! Page View Models
//!
//! Templates only receive display strings; optional columns are rendered
//! as `-`.

use askama::Template;
use web::{FormState, Layout};

use crate::domain::entities::{DashboardStatistics, Employee, EmployeeDetail};
use crate::domain::value_objects::{EmployeeStatus, Gender};
use crate::presentation::dto::DATE_FORMAT;

const EMPTY: &str = "-";

fn or_dash(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| EMPTY.to_string())
}

/// One employee as displayed in the list and on the detail page
#[derive(Debug, Clone)]
pub struct EmployeeItem {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub tax_number: String,
    pub gender: String,
    pub hired_date: String,
    pub address: String,
    pub status: String,
    pub badge: &'static str,
    pub total_allowance: i64,
}

impl From<&Employee> for EmployeeItem {
    fn from(e: &Employee) -> Self {
        Self {
            id: e.id.get(),
            name: e.name.clone(),
            email: or_dash(&e.email),
            tax_number: or_dash(&e.tax_number),
            gender: e.gender.map_or_else(|| EMPTY.to_string(), |g| g.to_string()),
            hired_date: e
                .hired_date
                .map_or_else(|| EMPTY.to_string(), |d| d.format(DATE_FORMAT).to_string()),
            address: or_dash(&e.address),
            status: e.status.map_or_else(|| EMPTY.to_string(), |s| s.to_string()),
            badge: e.status.map_or("light", |s| s.badge()),
            total_allowance: e.total_allowance,
        }
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardView {
    pub layout: Layout,
    pub stats: DashboardStatistics,
}

#[derive(Template)]
#[template(path = "employees/index.html")]
pub struct IndexView {
    pub layout: Layout,
    pub employees: Vec<EmployeeItem>,
}

#[derive(Template)]
#[template(path = "employees/view.html")]
pub struct ShowView {
    pub layout: Layout,
    pub employee: EmployeeItem,
    pub allowances: Vec<String>,
}

impl ShowView {
    pub fn new(layout: Layout, detail: &EmployeeDetail) -> Self {
        Self {
            layout,
            employee: EmployeeItem::from(&detail.employee),
            allowances: detail.allowance_labels(),
        }
    }
}

/// `<option>` of a select input
#[derive(Debug, Clone)]
pub struct Choice {
    pub value: &'static str,
    pub selected: bool,
}

/// Current values of the employee form inputs
#[derive(Debug, Clone, Default)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub tax_number: String,
    pub gender: String,
    pub hired_date: String,
    pub address: String,
    pub status: String,
    pub allowances: Vec<String>,
}

impl From<&EmployeeDetail> for FormValues {
    fn from(detail: &EmployeeDetail) -> Self {
        let e = &detail.employee;
        Self {
            name: e.name.clone(),
            email: e.email.clone().unwrap_or_default(),
            tax_number: e.tax_number.clone().unwrap_or_default(),
            gender: e.gender.map(|g| g.code().to_string()).unwrap_or_default(),
            hired_date: e
                .hired_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            address: e.address.clone().unwrap_or_default(),
            status: e.status.map(|s| s.code().to_string()).unwrap_or_default(),
            allowances: detail.allowance_labels(),
        }
    }
}

/// Create and edit pages
#[derive(Template)]
#[template(path = "employees/form.html")]
pub struct EmployeeFormView {
    pub layout: Layout,
    pub form: FormState,
    pub heading: &'static str,
    pub action: String,
    /// `_method` override, `None` for a plain POST
    pub method: Option<&'static str>,
    pub cancel_url: String,
    pub values: FormValues,
    pub genders: Vec<Choice>,
    pub statuses: Vec<Choice>,
}

impl EmployeeFormView {
    /// Old input of a failed submission wins over `stored`
    fn build(layout: Layout, form: FormState, stored: FormValues) -> Self {
        let mut allowances = form.old_values("allowances", &stored.allowances);
        if allowances.is_empty() {
            allowances.push(String::new());
        }
        let values = FormValues {
            name: form.old("name", &stored.name),
            email: form.old("email", &stored.email),
            tax_number: form.old("tax_number", &stored.tax_number),
            gender: form.old("gender", &stored.gender),
            hired_date: form.old("hired_date", &stored.hired_date),
            address: form.old("address", &stored.address),
            status: form.old("status", &stored.status),
            allowances,
        };
        let genders = Gender::ALL
            .iter()
            .map(|g| Choice {
                value: g.code(),
                selected: values.gender == g.code(),
            })
            .collect();
        let statuses = EmployeeStatus::ALL
            .iter()
            .map(|s| Choice {
                value: s.code(),
                selected: values.status == s.code(),
            })
            .collect();

        Self {
            layout,
            form,
            heading: "",
            action: String::new(),
            method: None,
            cancel_url: String::new(),
            values,
            genders,
            statuses,
        }
    }

    pub fn create(layout: Layout, form: FormState) -> Self {
        Self {
            heading: "Create employee",
            action: "/employees".to_string(),
            cancel_url: "/employees".to_string(),
            ..Self::build(layout, form, FormValues::default())
        }
    }

    pub fn edit(layout: Layout, form: FormState, detail: &EmployeeDetail) -> Self {
        let id = detail.employee.id.get();
        Self {
            heading: "Edit employee",
            action: format!("/employees/{id}"),
            method: Some("PUT"),
            cancel_url: format!("/employees/{id}"),
            ..Self::build(layout, form, FormValues::from(detail))
        }
    }
}
