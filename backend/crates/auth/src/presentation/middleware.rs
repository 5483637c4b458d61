//! Auth Middleware
//!
//! Route guards:
//! - [`require_auth`]: resolves the auth token to a [`Principal`] or
//!   redirects to `/login`
//! - [`require_guest`]: sends already signed-in users to `/dashboard`

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use platform::cookie::read_token;
use web::Principal;
use web::principal::LOGIN_PATH;

use crate::application::CheckSessionUseCase;
use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::presentation::handlers::AuthAppState;

/// Where signed-in users are sent from guest pages
pub const DASHBOARD_PATH: &str = "/dashboard";

async fn current_user<R>(state: &AuthAppState<R>, headers: &HeaderMap) -> Option<User>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let token = read_token(headers, &state.config.cookie.name)?;
    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());

    match use_case.execute(&token).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, "Session lookup failed");
            None
        }
    }
}

/// Middleware that requires a signed-in user
pub async fn require_auth<R>(State(state): State<AuthAppState<R>>, mut req: Request, next: Next) -> Response
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let Some(user) = current_user(&state, req.headers()).await else {
        tracing::debug!(uri = %req.uri(), "Unauthenticated request redirected");
        return Redirect::to(LOGIN_PATH).into_response();
    };

    req.extensions_mut().insert::<Principal>(user.to_principal());
    next.run(req).await
}

/// Middleware that only lets guests through
pub async fn require_guest<R>(State(state): State<AuthAppState<R>>, req: Request, next: Next) -> Response
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    if current_user(&state, req.headers()).await.is_some() {
        return Redirect::to(DASHBOARD_PATH).into_response();
    }

    next.run(req).await
}
