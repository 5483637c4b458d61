//! HTTP Handlers
//!
//! Page handlers for login, registration, logout and the account form.
//! Failures are returned as [`WebError`] and turned into flash redirects by
//! the error translator.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use axum::response::Response;
use kernel::error::app_error::AppError;
use validator::Validate;
use web::{AlertKind, Page, Principal, ValidatedForm, WebError, WebResult};

use crate::application::config::AuthConfig;
use crate::application::{
    AvatarUpload, SignInInput, SignInUseCase, SignUpInput, SignUpUseCase, UpdateAccountInput,
    UpdateAccountUseCase,
};
use crate::domain::repository::UserRepository;
use crate::presentation::dto::{AccountForm, LoginForm, RegisterForm};
use crate::presentation::views::{AccountView, LoginView, RegisterView};

/// Where a successful login lands
pub const HOME_PATH: &str = "/";

/// Shared state for auth handlers and gates
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// GET /login
pub async fn login_page(mut page: Page) -> WebResult<Response> {
    let (layout, form) = page.layout("Login", None);
    page.render(&LoginView { layout, form })
}

/// POST /login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    mut page: Page,
    ValidatedForm(form): ValidatedForm<LoginForm>,
) -> WebResult<Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());

    let remember = form.remember();
    let output = use_case
        .execute(SignInInput {
            identifier: form.username,
            password: form.password,
            remember,
        })
        .await?;

    page.add_cookie(state.config.cookie.build(output.token, output.lifetime));
    Ok(page.redirect(HOME_PATH))
}

// ============================================================================
// Register
// ============================================================================

/// GET /register
pub async fn register_page(mut page: Page) -> WebResult<Response> {
    let (layout, form) = page.layout("Register", None);
    page.render(&RegisterView { layout, form })
}

/// POST /register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    mut page: Page,
    ValidatedForm(form): ValidatedForm<RegisterForm>,
) -> WebResult<Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone());

    use_case
        .execute(SignUpInput {
            name: form.name,
            username: form.username,
            email: form.email,
            password: form.password,
        })
        .await?;

    page.alert(AlertKind::Success, "Registration successful, please login");
    Ok(page.redirect(web::principal::LOGIN_PATH))
}

// ============================================================================
// Logout
// ============================================================================

/// GET /logout
pub async fn logout<R>(State(state): State<AuthAppState<R>>, principal: Principal, mut page: Page) -> Response
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    page.add_cookie(state.config.cookie.build_delete());
    page.alert(AlertKind::Warning, "You are logged out");
    tracing::info!(user_id = %principal.id, "User logged out");
    page.redirect(web::principal::LOGIN_PATH)
}

// ============================================================================
// Account
// ============================================================================

/// GET /account
pub async fn account_page(principal: Principal, mut page: Page) -> WebResult<Response> {
    let (layout, form) = page.layout("Account", Some(&principal));
    let view = AccountView {
        name: form.old("name", &principal.name),
        username: form.old("username", &principal.username),
        email: form.old("email", &principal.email),
        avatar_url: principal.avatar_url(),
        layout,
        form,
    };
    page.render(&view)
}

fn multipart_error(err: MultipartError) -> WebError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large(err.body_text()).into()
    } else {
        AppError::bad_request(err.body_text()).into()
    }
}

/// POST /account (multipart)
pub async fn update_account<R>(
    State(state): State<AuthAppState<R>>,
    principal: Principal,
    mut page: Page,
    mut multipart: Multipart,
) -> WebResult<Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let mut form = AccountForm::default();
    let mut avatar = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "avatar" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(multipart_error)?;
            // An empty file input still sends a part
            if !file_name.is_empty() && !bytes.is_empty() {
                avatar = Some(AvatarUpload {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
        } else {
            let value = field.text().await.map_err(multipart_error)?;
            form.set(&name, value);
        }
    }

    form.validate()?;

    let use_case = UpdateAccountUseCase::new(state.repo.clone(), state.config.clone());
    use_case
        .execute(UpdateAccountInput {
            user_id: principal.id,
            name: form.name,
            username: form.username,
            email: form.email,
            current_password: form.current_password,
            password: form.password,
            avatar,
        })
        .await?;

    page.alert(AlertKind::Success, "Account successfully updated");
    Ok(page.redirect("/account"))
}
