//! Bearer Token (JWT)
//!
//! Self-contained HS256 tokens carrying the user id as `sub`.
//! Validation accepts any HMAC algorithm, rejects expired tokens with no
//! leeway, and coerces the subject from a JSON number or numeric string.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token errors
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Sign(#[source] jsonwebtoken::errors::Error),

    /// Bad signature, wrong algorithm, expired, malformed
    #[error("invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("token subject is not a user id")]
    InvalidSubject,
}

/// Registered claims used by the app
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Stringified user id on issue; numbers are tolerated on read
    pub sub: serde_json::Value,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Subject as a positive user id
    pub fn user_id(&self) -> Result<i64, TokenError> {
        let id = match &self.sub {
            serde_json::Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        id.filter(|id| *id > 0).ok_or(TokenError::InvalidSubject)
    }
}

/// HMAC signer/validator bound to the server secret
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenSigner {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.required_spec_claims = HashSet::from(["exp".to_string()]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Sign a token for `user_id` that expires at `expires_at`
    pub fn issue(&self, user_id: i64, expires_at: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            sub: serde_json::Value::String(user_id.to_string()),
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(TokenError::Sign)
    }

    /// Verify and return the user id
    pub fn validate(&self, token: &str) -> Result<i64, TokenError> {
        let data =
            decode::<Claims>(token, &self.decoding, &self.validation).map_err(TokenError::Invalid)?;
        data.claims.user_id()
    }
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("secret", &"[REDACTED]")
            .field("algorithms", &self.validation.algorithms)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
    use chrono::Duration;

    fn signer() -> TokenSigner {
        TokenSigner::new(b"test-secret")
    }

    #[test]
    fn test_issue_and_validate() {
        let token = signer()
            .issue(42, Utc::now() + Duration::hours(2))
            .unwrap();
        assert_eq!(token.split('.').count(), 3);
        assert_eq!(signer().validate(&token).unwrap(), 42);
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = signer()
            .issue(42, Utc::now() - Duration::seconds(5))
            .unwrap();
        assert!(matches!(
            signer().validate(&token),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let token = signer()
            .issue(42, Utc::now() + Duration::hours(2))
            .unwrap();
        let sig_start = token.rfind('.').unwrap() + 1;
        let mut bytes = token.into_bytes();
        bytes[sig_start] = if bytes[sig_start] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(signer().validate(&tampered).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = TokenSigner::new(b"other-secret")
            .issue(42, Utc::now() + Duration::hours(2))
            .unwrap();
        assert!(signer().validate(&token).is_err());
    }

    #[test]
    fn test_numeric_subject_accepted() {
        let claims = serde_json::json!({
            "sub": 7,
            "iat": Utc::now().timestamp(),
            "exp": (Utc::now() + Duration::hours(1)).timestamp(),
        });
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert_eq!(signer().validate(&token).unwrap(), 7);
    }

    #[test]
    fn test_non_numeric_subject_rejected() {
        let claims = serde_json::json!({
            "sub": "alice",
            "iat": Utc::now().timestamp(),
            "exp": (Utc::now() + Duration::hours(1)).timestamp(),
        });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert!(matches!(
            signer().validate(&token),
            Err(TokenError::InvalidSubject)
        ));
    }

    #[test]
    fn test_unsigned_token_rejected() {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(
            serde_json::json!({
                "sub": "1",
                "exp": (Utc::now() + Duration::hours(1)).timestamp(),
            })
            .to_string(),
        );
        let token = format!("{header}.{payload}.");
        assert!(signer().validate(&token).is_err());
    }

    #[test]
    fn test_missing_exp_rejected() {
        let claims = serde_json::json!({ "sub": "1", "iat": Utc::now().timestamp() });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert!(signer().validate(&token).is_err());
    }
}
