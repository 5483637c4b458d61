//! Flash Messages
//!
//! One-shot payloads carried from a POST to the page it redirects to.
//! The payload is JSON, base64 encoded (standard alphabet) and stored in a
//! short-lived cookie that is removed the moment it is read.

use std::collections::BTreeMap;
use std::time::Duration;

use axum_extra::extract::cookie::CookieJar;
use platform::cookie::CookieConfig;
use platform::crypto::{from_base64, to_base64};
use serde::{Deserialize, Serialize};

/// Lifetime of the flash cookie
pub const FLASH_MAX_AGE: Duration = Duration::from_secs(60);

/// Default flash cookie name
pub const DEFAULT_FLASH_COOKIE: &str = "session_store";

// ============================================================================
// Payload
// ============================================================================

/// Banner style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Success,
    Info,
    Warning,
    Danger,
    Error,
}

impl AlertKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Error => "error",
        }
    }
}

/// Banner shown at the top of the next page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
}

/// A submitted field: repeated keys become a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OldValue {
    One(String),
    Many(Vec<String>),
}

/// Previously submitted form fields, used to refill a form after a failure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OldInput(BTreeMap<String, OldValue>);

impl OldInput {
    /// Group `(key, value)` pairs; a key seen more than once becomes a list
    ///
    /// ```
    /// use web::flash::OldInput;
    ///
    /// let old = OldInput::from_pairs([("name", "Ann"), ("allowances", "Meal"), ("allowances", "Bus")]);
    /// assert_eq!(old.value("name", ""), "Ann");
    /// assert_eq!(old.values("allowances"), vec!["Meal", "Bus"]);
    /// ```
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (key, value) in pairs {
            grouped.entry(key.into()).or_default().push(value.into());
        }

        let fields = grouped
            .into_iter()
            .map(|(key, mut values)| {
                let value = if values.len() == 1 {
                    OldValue::One(values.remove(0))
                } else {
                    OldValue::Many(values)
                };
                (key, value)
            })
            .collect();
        Self(fields)
    }

    /// Field value; the first element when the field is a list
    pub fn value(&self, key: &str, default: &str) -> String {
        match self.0.get(key) {
            Some(OldValue::One(value)) => value.clone(),
            Some(OldValue::Many(values)) => values
                .first()
                .cloned()
                .unwrap_or_else(|| default.to_string()),
            None => default.to_string(),
        }
    }

    /// Field values; a single value becomes a one-element list
    pub fn values(&self, key: &str) -> Vec<String> {
        match self.0.get(key) {
            Some(OldValue::One(value)) => vec![value.clone()],
            Some(OldValue::Many(values)) => values.clone(),
            None => Vec::new(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drop a field (passwords are never echoed back)
    pub fn remove(&mut self, key: &str) {
        self.0.remove(key);
    }
}

/// Everything a flash cookie can carry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert: Option<Alert>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old: Option<OldInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

impl FlashPayload {
    /// Banner-only payload
    pub fn alert(kind: AlertKind, message: impl Into<String>) -> Self {
        Self {
            alert: Some(Alert {
                kind,
                message: message.into(),
            }),
            ..Self::default()
        }
    }

    /// Payload written after a failed form submission
    pub fn failure(
        message: impl Into<String>,
        old: OldInput,
        errors: BTreeMap<String, String>,
    ) -> Self {
        let message = message.into();
        Self {
            alert: Some(Alert {
                kind: AlertKind::Danger,
                message: message.clone(),
            }),
            old: Some(old),
            error: Some(message),
            errors: Some(errors),
        }
    }

    /// JSON then base64
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_vec(self).map(|json| to_base64(&json))
    }

    /// `None` for anything that is not a valid encoded payload
    pub fn decode(value: &str) -> Option<Self> {
        let json = from_base64(value).ok()?;
        serde_json::from_slice(&json).ok()
    }
}

// ============================================================================
// Cookie store
// ============================================================================

/// Reads and writes the flash cookie
#[derive(Debug, Clone)]
pub struct FlashStore {
    cookie: CookieConfig,
}

impl Default for FlashStore {
    fn default() -> Self {
        Self::new(DEFAULT_FLASH_COOKIE)
    }
}

impl FlashStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            cookie: CookieConfig::named(name),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie.name
    }

    /// Replace any pending flash with `payload`
    pub fn put(&self, jar: CookieJar, payload: &FlashPayload) -> CookieJar {
        match payload.encode() {
            Ok(value) => jar.add(self.cookie.build(value, FLASH_MAX_AGE)),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to encode flash payload");
                jar
            }
        }
    }

    /// Read and delete the flash cookie
    ///
    /// The cookie is removed whether or not it decodes, so a corrupt payload
    /// is dropped rather than shown again.
    pub fn take(&self, jar: CookieJar) -> (CookieJar, Option<FlashPayload>) {
        let Some(value) = jar
            .get(self.cookie_name())
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
        else {
            return (jar, None);
        };

        let jar = jar.add(self.cookie.build_delete());
        let payload = FlashPayload::decode(&value);
        if payload.is_none() {
            tracing::debug!("Discarded unreadable flash cookie");
        }
        (jar, payload)
    }
}
