//! Router Composition
//!
//! Guest and signed-in auth pages, the gated employee pages, uploaded files
//! and the 404 fallback, under the error translator and request tracing.
//! Method override has to run before routing, so [`service`] wraps the
//! finished router instead of adding it as a layer.

use std::convert::Infallible;
use std::sync::Arc;

use auth::{AuthAppState, PgUserRepository, auth_routes, require_auth};
use axum::Router;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::response::Response;
use employee::{PgEmployeeRepository, employee_router};
use sqlx::PgPool;
use tower::{Layer, Service};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use web::method_override::method_override;
use web::translator::translate_errors;

use crate::config::AppConfig;

/// Body of unmatched routes
pub const NOT_FOUND_MESSAGE: &str = "Page not found";

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
}

/// All page routes over one pool
pub fn router(pool: PgPool, config: &AppConfig) -> Router {
    let auth_state = AuthAppState::new(PgUserRepository::new(pool.clone()), config.auth.clone());

    let employees = employee_router(PgEmployeeRepository::new(pool))
        .route_layer(from_fn_with_state(auth_state.clone(), require_auth::<PgUserRepository>));

    Router::new()
        .merge(auth_routes(auth_state))
        .merge(employees)
        .nest_service("/uploads", ServeDir::new(&config.upload_dir))
        .fallback(not_found)
        .layer(from_fn_with_state(Arc::new(config.web.clone()), translate_errors))
        .layer(TraceLayer::new_for_http())
}

/// Router wrapped in the method override
pub fn service(
    router: Router,
) -> impl Service<Request, Response = Response, Error = Infallible, Future: Send> + Clone + Send + 'static {
    from_fn(method_override).layer(router)
}
