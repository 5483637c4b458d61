//! Page Rendering
//!
//! [`Page`] is the per-request handle page handlers use to consume the
//! incoming flash, queue cookies, render askama templates and redirect.
//! [`Layout`] and [`FormState`] are the view-model pieces every template
//! shares.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::sync::Arc;

use askama::Template;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::context::WebContext;
use crate::error::WebResult;
use crate::flash::{Alert, AlertKind, FlashPayload, OldInput};
use crate::principal::Principal;

// ============================================================================
// View models
// ============================================================================

/// Data used by `layout.html`
#[derive(Debug, Clone)]
pub struct Layout {
    pub app_name: String,
    pub title: String,
    pub user: Option<Principal>,
    pub alert: Option<Alert>,
}

impl Layout {
    pub fn user_name(&self) -> &str {
        self.user.as_ref().map(|u| u.name.as_str()).unwrap_or_default()
    }

    pub fn avatar_url(&self) -> Option<String> {
        self.user.as_ref().and_then(Principal::avatar_url)
    }

    pub fn is_guest(&self) -> bool {
        self.user.is_none()
    }
}

/// Old input and field errors of the previous failed submission
#[derive(Debug, Clone, Default)]
pub struct FormState {
    old: OldInput,
    errors: BTreeMap<String, String>,
}

impl FormState {
    pub fn new(old: OldInput, errors: BTreeMap<String, String>) -> Self {
        Self { old, errors }
    }

    /// Resubmitted value, or `current` on a fresh form
    pub fn old(&self, key: &str, current: &str) -> String {
        self.old.value(key, current)
    }

    /// Resubmitted list; falls back to `current` only on a fresh form
    pub fn old_values(&self, key: &str, current: &[String]) -> Vec<String> {
        if self.old.is_empty() {
            current.to_vec()
        } else {
            self.old.values(key)
        }
    }

    /// Field message, empty when the field passed
    pub fn error(&self, key: &str) -> &str {
        self.errors.get(key).map(String::as_str).unwrap_or_default()
    }

    pub fn has_error(&self, key: &str) -> bool {
        self.errors.contains_key(key)
    }
}

// ============================================================================
// Page handle
// ============================================================================

/// Flash/cookie plumbing for one page request
#[derive(Debug)]
pub struct Page {
    ctx: Arc<WebContext>,
    jar: CookieJar,
}

impl<S> FromRequestParts<S> for Page
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = parts
            .extensions
            .get::<Arc<WebContext>>()
            .cloned()
            .unwrap_or_default();
        Ok(Self {
            ctx,
            jar: CookieJar::from_headers(&parts.headers),
        })
    }
}

impl Page {
    pub fn new(ctx: Arc<WebContext>, jar: CookieJar) -> Self {
        Self { ctx, jar }
    }

    pub fn context(&self) -> &WebContext {
        &self.ctx
    }

    /// Consume the incoming flash (at most once per request)
    pub fn take_flash(&mut self) -> Option<FlashPayload> {
        let jar = std::mem::take(&mut self.jar);
        let (jar, payload) = self.ctx.flash.take(jar);
        self.jar = jar;
        payload
    }

    /// Queue a flash for the next page
    pub fn flash(&mut self, payload: &FlashPayload) {
        let jar = std::mem::take(&mut self.jar);
        self.jar = self.ctx.flash.put(jar, payload);
    }

    pub fn alert(&mut self, kind: AlertKind, message: impl Into<String>) {
        self.flash(&FlashPayload::alert(kind, message));
    }

    pub fn add_cookie(&mut self, cookie: Cookie<'static>) {
        let jar = std::mem::take(&mut self.jar);
        self.jar = jar.add(cookie);
    }

    /// Layout and form state for a rendered page, consuming the flash
    pub fn layout(&mut self, title: &str, user: Option<&Principal>) -> (Layout, FormState) {
        let flash = self.take_flash().unwrap_or_default();
        let layout = Layout {
            app_name: self.ctx.app_name.clone(),
            title: title.to_string(),
            user: user.cloned(),
            alert: flash.alert,
        };
        let form = FormState::new(flash.old.unwrap_or_default(), flash.errors.unwrap_or_default());
        (layout, form)
    }

    pub fn render<T: Template>(self, template: &T) -> WebResult<Response> {
        let html = template.render().map_err(anyhow::Error::new)?;
        Ok((self.jar, Html(html)).into_response())
    }

    /// 303 See Other
    pub fn redirect(self, to: &str) -> Response {
        (self.jar, Redirect::to(to)).into_response()
    }
}
