//! Error Translator
//!
//! Outermost page middleware. Handlers fail with [`WebError`], which leaves
//! an [`ErrorReport`] in the response extensions; this layer turns that
//! report into the final response:
//!
//! - form submissions from a page (`method != GET`, `Accept: text/html`,
//!   same-origin `Referer` present): flash banner + old input + field
//!   errors, then 303 back to the referring page
//! - anything else: plain-text message with the report's status
//!
//! [`WebError`]: crate::error::WebError

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, Method, Uri, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use url::{Url, form_urlencoded};

use crate::context::WebContext;
use crate::error::ErrorReport;
use crate::extract::{buffer_body, is_urlencoded};
use crate::flash::{FlashPayload, OldInput};

/// Fields never written back into a flash cookie
const SECRET_FIELDS: &[&str] = &[
    "password",
    "password_confirmation",
    "current_password",
    "_method",
];

/// Request details captured before the handler consumes the request
struct Submission {
    method: Method,
    accepts_html: bool,
    referer: Option<String>,
    old: OldInput,
}

fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("text/html"))
}

/// Host the request was sent to, `Host` header first
fn request_host(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| uri.authority().map(|a| a.to_string()))
}

/// Redirect target taken from `Referer`
///
/// Only a local path or a URL on the requested host qualifies; the latter
/// is reduced to its path and query.
fn referer(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    let raw = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())?;

    if raw.starts_with('/') {
        return (!raw.starts_with("//") && !raw.starts_with("/\\")).then(|| raw.to_string());
    }

    let url = Url::parse(raw).ok()?;
    let authority = match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        (None, _) => return None,
    };
    let host = request_host(headers, uri)?;
    if !matches!(url.scheme(), "http" | "https") || !authority.eq_ignore_ascii_case(&host) {
        tracing::debug!(referer = raw, "Ignoring cross-origin referer");
        return None;
    }

    Some(match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_string(),
    })
}

fn old_input(body: &[u8]) -> OldInput {
    let mut old = OldInput::from_pairs(form_urlencoded::parse(body).into_owned());
    for field in SECRET_FIELDS {
        old.remove(field);
    }
    old
}

/// Middleware translating handler failures into responses
pub async fn translate_errors(
    State(ctx): State<Arc<WebContext>>,
    mut req: Request,
    next: Next,
) -> Response {
    let headers = req.headers();
    let mut submission = Submission {
        method: req.method().clone(),
        accepts_html: accepts_html(headers),
        referer: referer(headers, req.uri()),
        old: OldInput::default(),
    };

    if submission.method != Method::GET && is_urlencoded(req.headers()) {
        match buffer_body(req).await {
            Ok((buffered, body)) => {
                submission.old = old_input(&body);
                req = buffered;
            }
            Err(e) => return e.into_response(),
        }
    }

    req.extensions_mut().insert(ctx.clone());
    let mut response = next.run(req).await;

    match response.extensions_mut().remove::<ErrorReport>() {
        Some(report) => translate(&ctx, submission, report),
        None => response,
    }
}

fn translate(ctx: &WebContext, submission: Submission, report: ErrorReport) -> Response {
    let message = report.message(ctx.production).to_string();

    match submission.referer.as_deref() {
        Some(referer) if submission.method != Method::GET && submission.accepts_html => {
            let payload = FlashPayload::failure(message, submission.old, report.errors());
            let jar = ctx.flash.put(CookieJar::new(), &payload);
            (jar, Redirect::to(referer)).into_response()
        }
        _ => (report.status(), message).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::middleware::from_fn_with_state;
    use axum::routing::post;
    use http_body_util::BodyExt;
    use kernel::error::app_error::AppError;
    use kernel::validation::ValidationError;
    use tower::ServiceExt;

    use crate::error::{GENERIC_ERROR_MESSAGE, WebError};
    use crate::flash::FlashStore;
    use axum_extra::extract::cookie::Cookie;

    fn app(production: bool) -> Router {
        let ctx = Arc::new(WebContext {
            production,
            ..WebContext::default()
        });
        Router::new()
            .route(
                "/employees",
                post(|| async {
                    Err::<(), _>(WebError::from(
                        ValidationError::new().with_field("name", "Name is required"),
                    ))
                }),
            )
            .route(
                "/missing",
                post(|| async { Err::<(), _>(WebError::from(AppError::not_found("Employee not found"))) }),
            )
            .route(
                "/boom",
                post(|| async { Err::<(), _>(WebError::from(anyhow::anyhow!("pool closed"))) }),
            )
            .layer(from_fn_with_state(ctx, translate_errors))
    }

    fn form_post(uri: &str) -> axum::http::request::Builder {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
    }

    fn flash_of(response: &Response) -> Option<FlashPayload> {
        let name = FlashStore::default().cookie_name().to_string();
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| Cookie::parse(v.to_str().ok()?.to_string()).ok())
            .find(|c| c.name() == name)
            .and_then(|c| FlashPayload::decode(c.value()))
    }

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_page_form_failure_redirects_with_flash() {
        let body = "name=&email=ann%40example.com&allowances=Meal&allowances=Bus&password=secret";
        let req = form_post("/employees")
            .header(header::ACCEPT, "text/html,application/xhtml+xml")
            .header(header::REFERER, "/employees/create")
            .body(Body::from(body))
            .unwrap();

        let response = app(true).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/employees/create");

        let payload = flash_of(&response).unwrap();
        let alert = payload.alert.unwrap();
        assert_eq!(alert.message, "Please check the data you provided.");
        assert_eq!(payload.error.as_deref(), Some("Please check the data you provided."));
        assert_eq!(
            payload.errors.unwrap().get("name").map(String::as_str),
            Some("Name is required")
        );

        let old = payload.old.unwrap();
        assert_eq!(old.value("email", ""), "ann@example.com");
        assert_eq!(old.values("allowances"), vec!["Meal", "Bus"]);
        assert!(!old.contains("password"));
    }

    fn headers(pairs: &[(header::HeaderName, &'static str)]) -> HeaderMap {
        pairs
            .iter()
            .map(|(name, value)| (name.clone(), header::HeaderValue::from_static(value)))
            .collect()
    }

    #[test]
    fn test_referer_must_stay_on_site() {
        let uri = Uri::from_static("/employees");
        let same = |value| {
            referer(
                &headers(&[(header::HOST, "admin.local:8080"), (header::REFERER, value)]),
                &uri,
            )
        };

        assert_eq!(same("/employees/create").as_deref(), Some("/employees/create"));
        assert_eq!(
            same("http://admin.local:8080/employees/1/edit?tab=2").as_deref(),
            Some("/employees/1/edit?tab=2")
        );
        assert_eq!(same("https://evil.example/phish"), None);
        assert_eq!(same("http://admin.local/employees"), None);
        assert_eq!(same("//evil.example/phish"), None);
        assert_eq!(same("javascript:alert(1)"), None);
        assert_eq!(referer(&headers(&[(header::REFERER, "http://admin.local/x")]), &uri), None);
    }

    #[tokio::test]
    async fn test_cross_site_referer_gets_plain_status() {
        let req = form_post("/employees")
            .header(header::ACCEPT, "text/html")
            .header(header::HOST, "admin.local")
            .header(header::REFERER, "https://evil.example/form")
            .body(Body::from("name="))
            .unwrap();

        let response = app(true).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(response.headers().get(header::LOCATION).is_none());
    }

    #[tokio::test]
    async fn test_without_referer_validation_is_422() {
        let req = form_post("/employees")
            .header(header::ACCEPT, "text/html")
            .body(Body::from("name="))
            .unwrap();

        let response = app(true).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_text(response).await, "Please check the data you provided.");
    }

    #[tokio::test]
    async fn test_app_error_keeps_status_for_api_clients() {
        let req = form_post("/missing")
            .header(header::ACCEPT, "application/json")
            .header(header::REFERER, "/employees")
            .body(Body::empty())
            .unwrap();

        let response = app(true).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "Employee not found");
    }

    #[tokio::test]
    async fn test_internal_error_text_hidden_in_production() {
        let req = || {
            Request::builder()
                .method(Method::POST)
                .uri("/boom")
                .body(Body::empty())
                .unwrap()
        };

        let response = app(true).oneshot(req()).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, GENERIC_ERROR_MESSAGE);

        let response = app(false).oneshot(req()).await.unwrap();
        assert_eq!(body_text(response).await, "pool closed");
    }
}
