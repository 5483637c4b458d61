//! Request Extractors
//!
//! - [`ValidatedForm`]: urlencoded form + `validator` rules
//! - [`parse_id`]: positive integer path segments
//! - [`required`]: `validator` rule for blank-rejecting text fields
//! - form body buffering shared by the middlewares

use axum::body::{Body, Bytes, to_bytes};
use axum::extract::{FromRequest, Request};
use axum::http::{HeaderMap, header};
use axum_extra::extract::Form;
use kernel::error::app_error::AppError;
use kernel::id::Id;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::WebError;

/// Upper bound for buffered urlencoded bodies
pub const MAX_FORM_BYTES: usize = 2 << 20;

/// Urlencoded form that has passed its `validator` rules
///
/// Deserialization problems are a 400; rule violations are a
/// [`WebError::Validation`] carrying the field messages.
#[derive(Debug, Clone)]
pub struct ValidatedForm<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(data) = Form::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.to_string()))?;

        data.validate()?;
        Ok(Self(data))
    }
}

/// Parse a path segment as a positive id
///
/// ```
/// use kernel::id::EmployeeId;
/// use web::extract::parse_id;
///
/// let id: EmployeeId = parse_id("7", "employee").unwrap();
/// assert_eq!(id.get(), 7);
/// assert!(parse_id::<kernel::id::markers::Employee>("abc", "employee").is_err());
/// ```
pub fn parse_id<T>(raw: &str, entity: &str) -> Result<Id<T>, WebError> {
    raw.parse::<Id<T>>()
        .map_err(|e| AppError::bad_request(format!("Invalid {entity} id")).with_source(e).into())
}

/// Rejects empty and whitespace-only values
///
/// Form structs deserialize missing fields as empty strings, so this is
/// the "required" rule for text inputs.
pub fn required(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("required"));
    }
    Ok(())
}

pub(crate) fn is_urlencoded(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"))
}

/// Read the whole body and hand back an equivalent request
pub(crate) async fn buffer_body(req: Request) -> Result<(Request, Bytes), AppError> {
    let (parts, body) = req.into_parts();
    let bytes = to_bytes(body, MAX_FORM_BYTES)
        .await
        .map_err(|_| AppError::payload_too_large("Request body is too large"))?;
    let req = Request::from_parts(parts, Body::from(bytes.clone()));
    Ok((req, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Method, StatusCode};
    use kernel::id::EmployeeId;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct NameForm {
        #[serde(default)]
        #[validate(length(min = 3, message = "Name must be at least 3 characters"))]
        name: String,
    }

    fn form_request(body: &'static str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    #[test]
    fn test_parse_id() {
        let id: EmployeeId = parse_id("12", "employee").unwrap();
        assert_eq!(id.get(), 12);

        let err = parse_id::<kernel::id::markers::Employee>("-1", "employee").unwrap_err();
        let report = err.report();
        assert_eq!(report.status(), StatusCode::BAD_REQUEST);
        assert_eq!(report.message(true), "Invalid employee id");
    }

    #[tokio::test]
    async fn test_validated_form_accepts_valid_input() {
        let ValidatedForm(form) = ValidatedForm::<NameForm>::from_request(form_request("name=Ann+Lee"), &())
            .await
            .unwrap();
        assert_eq!(form.name, "Ann Lee");
    }

    #[tokio::test]
    async fn test_validated_form_reports_fields() {
        let err = ValidatedForm::<NameForm>::from_request(form_request("name=Al"), &())
            .await
            .unwrap_err();
        match err {
            WebError::Validation(e) => {
                assert_eq!(e.field("name"), Some("Name must be at least 3 characters"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_required_rejects_blank() {
        assert!(required("Ann").is_ok());
        assert!(required("").is_err());
        assert_eq!(required("  ").unwrap_err().code, "required");
    }

    #[tokio::test]
    async fn test_buffer_body_preserves_content() {
        let (req, bytes) = buffer_body(form_request("a=1&b=2")).await.unwrap();
        assert_eq!(&bytes[..], b"a=1&b=2");
        let again = to_bytes(req.into_body(), MAX_FORM_BYTES).await.unwrap();
        assert_eq!(again, bytes);
    }
}
