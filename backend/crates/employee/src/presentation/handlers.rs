//! HTTP Handlers
//!
//! Dashboard and employee pages. Every route sits behind the auth gate, so
//! each handler receives the [`Principal`] for the layout.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Response;
use kernel::id::EmployeeId;
use web::{AlertKind, Page, Principal, ValidatedForm, WebError, WebResult, parse_id};

use crate::application::{
    CreateEmployeeUseCase, DashboardUseCase, DeleteEmployeeUseCase, ListEmployeesUseCase,
    ShowEmployeeUseCase, UpdateEmployeeUseCase,
};
use crate::domain::repository::EmployeeRepository;
use crate::presentation::dto::EmployeeForm;
use crate::presentation::views::{DashboardView, EmployeeFormView, EmployeeItem, IndexView, ShowView};

/// Employee list page
pub const INDEX_PATH: &str = "/employees";

/// Shared state for employee handlers
#[derive(Clone)]
pub struct EmployeeAppState<R>
where
    R: EmployeeRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

impl<R> EmployeeAppState<R>
where
    R: EmployeeRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R) -> Self {
        Self { repo: Arc::new(repo) }
    }
}

fn employee_id(raw: &str) -> WebResult<EmployeeId> {
    parse_id(raw, "employee")
}

/// GET / and GET /dashboard
pub async fn dashboard<R>(
    State(state): State<EmployeeAppState<R>>,
    principal: Principal,
    mut page: Page,
) -> WebResult<Response>
where
    R: EmployeeRepository + Clone + Send + Sync + 'static,
{
    let stats = DashboardUseCase::new(state.repo.clone()).execute().await?;

    let (layout, _) = page.layout("Dashboard", Some(&principal));
    page.render(&DashboardView { layout, stats })
}

/// GET /employees
pub async fn index<R>(
    State(state): State<EmployeeAppState<R>>,
    principal: Principal,
    mut page: Page,
) -> WebResult<Response>
where
    R: EmployeeRepository + Clone + Send + Sync + 'static,
{
    let employees = ListEmployeesUseCase::new(state.repo.clone()).execute().await?;

    let (layout, _) = page.layout("Employees", Some(&principal));
    page.render(&IndexView {
        layout,
        employees: employees.iter().map(EmployeeItem::from).collect(),
    })
}

/// GET /employees/create
pub async fn create_page(principal: Principal, mut page: Page) -> WebResult<Response> {
    let (layout, form) = page.layout("Create employee", Some(&principal));
    page.render(&EmployeeFormView::create(layout, form))
}

/// POST /employees
pub async fn store<R>(
    State(state): State<EmployeeAppState<R>>,
    mut page: Page,
    ValidatedForm(form): ValidatedForm<EmployeeForm>,
) -> WebResult<Response>
where
    R: EmployeeRepository + Clone + Send + Sync + 'static,
{
    let draft = form.into_draft()?;
    CreateEmployeeUseCase::new(state.repo.clone()).execute(draft).await?;

    page.alert(AlertKind::Success, "Employee successfully created");
    Ok(page.redirect(INDEX_PATH))
}

/// GET /employees/{id}
pub async fn show<R>(
    State(state): State<EmployeeAppState<R>>,
    Path(id): Path<String>,
    principal: Principal,
    mut page: Page,
) -> WebResult<Response>
where
    R: EmployeeRepository + Clone + Send + Sync + 'static,
{
    let id = employee_id(&id)?;
    let detail = ShowEmployeeUseCase::new(state.repo.clone()).execute(id).await?;

    let (layout, _) = page.layout(&detail.employee.name, Some(&principal));
    page.render(&ShowView::new(layout, &detail))
}

/// GET /employees/{id}/edit
pub async fn edit_page<R>(
    State(state): State<EmployeeAppState<R>>,
    Path(id): Path<String>,
    principal: Principal,
    mut page: Page,
) -> WebResult<Response>
where
    R: EmployeeRepository + Clone + Send + Sync + 'static,
{
    let id = employee_id(&id)?;
    let detail = ShowEmployeeUseCase::new(state.repo.clone()).execute(id).await?;

    let (layout, form) = page.layout("Edit employee", Some(&principal));
    page.render(&EmployeeFormView::edit(layout, form, &detail))
}

/// PUT /employees/{id}
///
/// A malformed id wins over form errors.
pub async fn update<R>(
    State(state): State<EmployeeAppState<R>>,
    Path(id): Path<String>,
    mut page: Page,
    form: Result<ValidatedForm<EmployeeForm>, WebError>,
) -> WebResult<Response>
where
    R: EmployeeRepository + Clone + Send + Sync + 'static,
{
    let id = employee_id(&id)?;
    let ValidatedForm(form) = form?;
    let draft = form.into_draft()?;
    UpdateEmployeeUseCase::new(state.repo.clone()).execute(id, draft).await?;

    page.alert(AlertKind::Success, "Employee successfully updated");
    Ok(page.redirect(&format!("{INDEX_PATH}/{id}")))
}

/// DELETE /employees/{id}
pub async fn destroy<R>(
    State(state): State<EmployeeAppState<R>>,
    Path(id): Path<String>,
    mut page: Page,
) -> WebResult<Response>
where
    R: EmployeeRepository + Clone + Send + Sync + 'static,
{
    let id = employee_id(&id)?;
    DeleteEmployeeUseCase::new(state.repo.clone()).execute(id).await?;

    page.alert(AlertKind::Success, "Employee successfully deleted");
    Ok(page.redirect(INDEX_PATH))
}
