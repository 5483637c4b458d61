//! Employee Router
//!
//! Routes carry no gate of their own; the binary wraps this router in the
//! auth gate so handlers can rely on a [`web::Principal`].

use axum::{Router, routing::get};

use crate::domain::repository::EmployeeRepository;
use crate::infra::postgres::PgEmployeeRepository;
use crate::presentation::handlers::{self, EmployeeAppState};

/// Create the Employee router with PostgreSQL repository
pub fn employee_router(repo: PgEmployeeRepository) -> Router {
    employee_router_generic(repo)
}

/// Create a generic Employee router for any repository implementation
pub fn employee_router_generic<R>(repo: R) -> Router
where
    R: EmployeeRepository + Clone + Send + Sync + 'static,
{
    let state = EmployeeAppState::new(repo);

    Router::new()
        .route("/", get(handlers::dashboard::<R>))
        .route("/dashboard", get(handlers::dashboard::<R>))
        .route("/employees", get(handlers::index::<R>).post(handlers::store::<R>))
        .route("/employees/create", get(handlers::create_page))
        .route(
            "/employees/{id}",
            get(handlers::show::<R>)
                .put(handlers::update::<R>)
                .delete(handlers::destroy::<R>),
        )
        .route("/employees/{id}/edit", get(handlers::edit_page::<R>))
        .with_state(state)
}
