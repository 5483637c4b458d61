//! HTML Form Method Override
//!
//! Browsers only submit GET and POST. A POST carrying `_method=PUT|PATCH|DELETE`
//! (form field) or an `X-HTTP-Method-Override` header is rewritten to that
//! method. Must wrap the router, since routing happens on the method.

use axum::extract::Request;
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use url::form_urlencoded;

use crate::extract::{buffer_body, is_urlencoded};

pub const METHOD_OVERRIDE_HEADER: &str = "x-http-method-override";
pub const METHOD_OVERRIDE_FIELD: &str = "_method";

fn parse_override(value: &str) -> Option<Method> {
    match value.trim().to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}

pub async fn method_override(mut req: Request, next: Next) -> Response {
    if req.method() != Method::POST {
        return next.run(req).await;
    }

    let from_header = req
        .headers()
        .get(METHOD_OVERRIDE_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_override);

    let target = match from_header {
        Some(method) => Some(method),
        None if is_urlencoded(req.headers()) => {
            let (buffered, body) = match buffer_body(req).await {
                Ok(buffered) => buffered,
                Err(e) => return e.into_response(),
            };
            req = buffered;
            form_urlencoded::parse(&body)
                .find(|(key, _)| key == METHOD_OVERRIDE_FIELD)
                .and_then(|(_, value)| parse_override(&value))
        }
        None => None,
    };

    if let Some(method) = target {
        tracing::trace!(%method, uri = %req.uri(), "Method override");
        *req.method_mut() = method;
    }
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{StatusCode, header};
    use axum::middleware::from_fn;
    use axum::routing::{post, put};
    use http_body_util::BodyExt;
    use tower::{Layer, ServiceExt};

    async fn call(req: Request) -> (StatusCode, String) {
        let router = Router::new()
            .route("/employees/{id}", put(|| async { "put" }).delete(|| async { "delete" }))
            .route("/employees", post(|body: String| async move { body }));
        let app = from_fn(method_override).layer(router);

        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn form(uri: &str, body: &'static str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    #[test]
    fn test_parse_override() {
        assert_eq!(parse_override("delete"), Some(Method::DELETE));
        assert_eq!(parse_override(" PUT "), Some(Method::PUT));
        assert_eq!(parse_override("GET"), None);
        assert_eq!(parse_override("TRACE"), None);
    }

    #[tokio::test]
    async fn test_form_field_rewrites_to_delete() {
        let (status, body) = call(form("/employees/3", "_method=DELETE")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "delete");
    }

    #[tokio::test]
    async fn test_header_rewrites_to_put() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/employees/3")
            .header(METHOD_OVERRIDE_HEADER, "PUT")
            .body(Body::empty())
            .unwrap();
        let (status, body) = call(req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "put");
    }

    #[tokio::test]
    async fn test_plain_post_keeps_body() {
        let (status, body) = call(form("/employees", "name=Ann")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "name=Ann");
    }
}
