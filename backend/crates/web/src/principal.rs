//! Authenticated user of the current request
//!
//! Inserted into the request extensions by the auth gate and received by
//! handlers as an extractor argument.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Redirect;
use kernel::id::UserId;

/// Login page; where unauthenticated requests are sent
pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub email: String,
    /// Path relative to the upload directory
    pub avatar: Option<String>,
}

impl Principal {
    /// Public URL of the avatar, if any
    pub fn avatar_url(&self) -> Option<String> {
        self.avatar.as_ref().map(|path| format!("/uploads/{path}"))
    }
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or_else(|| Redirect::to(LOGIN_PATH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode, header};
    use axum::response::IntoResponse;

    fn principal() -> Principal {
        Principal {
            id: UserId::new(1),
            name: "Admin".to_string(),
            username: "admin".to_string(),
            email: "admin@example.com".to_string(),
            avatar: Some("avatars/2025/01/me.png".to_string()),
        }
    }

    #[tokio::test]
    async fn test_extracts_inserted_principal() {
        let mut req = Request::new(());
        req.extensions_mut().insert(principal());
        let (mut parts, _) = req.into_parts();

        let extracted = Principal::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(extracted, principal());
        assert_eq!(
            extracted.avatar_url().as_deref(),
            Some("/uploads/avatars/2025/01/me.png")
        );
    }

    #[tokio::test]
    async fn test_missing_principal_redirects_to_login() {
        let (mut parts, _) = Request::new(()).into_parts();
        let rejection = Principal::from_request_parts(&mut parts, &())
            .await
            .unwrap_err()
            .into_response();

        assert_eq!(rejection.status(), StatusCode::SEE_OTHER);
        assert_eq!(rejection.headers()[header::LOCATION], "/login");
    }
}
