//! Page View Models

use askama::Template;
use web::{FormState, Layout};

#[derive(Template)]
#[template(path = "auth/login.html")]
pub struct LoginView {
    pub layout: Layout,
    pub form: FormState,
}

#[derive(Template)]
#[template(path = "auth/register.html")]
pub struct RegisterView {
    pub layout: Layout,
    pub form: FormState,
}

/// Account form, prefilled from old input or the current user
#[derive(Template)]
#[template(path = "auth/account.html")]
pub struct AccountView {
    pub layout: Layout,
    pub form: FormState,
    pub name: String,
    pub username: String,
    pub email: String,
    pub avatar_url: Option<String>,
}
