//! Auth Router

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::get,
};
use platform::upload::MAX_AVATAR_BYTES;

use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{require_auth, require_guest};

/// Multipart limit for the account form: the avatar plus the text fields
const ACCOUNT_BODY_LIMIT: usize = MAX_AVATAR_BYTES * 4;

/// Guest and signed-in auth pages sharing one state
pub fn auth_routes<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let guest = Router::new()
        .route("/login", get(handlers::login_page).post(handlers::login::<R>))
        .route("/register", get(handlers::register_page).post(handlers::register::<R>))
        .route_layer(from_fn_with_state(state.clone(), require_guest::<R>));

    let signed_in = Router::new()
        .route("/logout", get(handlers::logout::<R>))
        .route(
            "/account",
            get(handlers::account_page).post(handlers::update_account::<R>),
        )
        .layer(DefaultBodyLimit::max(ACCOUNT_BODY_LIMIT))
        .route_layer(from_fn_with_state(state.clone(), require_auth::<R>));

    guest.merge(signed_in).with_state(state)
}
