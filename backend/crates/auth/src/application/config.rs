//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::crypto::random_bytes;
use platform::token::TokenSigner;
use platform::upload::UploadStore;

/// Token lifetime when "remember me" is checked (30 days)
pub const REMEMBER_TTL: Duration = Duration::from_secs(30 * 24 * 3600);

/// Default token lifetime (`JWT_EXPIRED`)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(7200);

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Auth token cookie
    pub cookie: CookieConfig,
    /// Token lifetime without "remember me"
    pub token_ttl: Duration,
    /// Token lifetime with "remember me"
    pub remember_ttl: Duration,
    /// JWT signer bound to `JWT_SECRET`
    pub signer: TokenSigner,
    /// Avatar storage
    pub uploads: UploadStore,
}

impl AuthConfig {
    pub fn new(secret: &[u8], uploads: UploadStore) -> Self {
        Self {
            cookie: CookieConfig::default(),
            token_ttl: DEFAULT_TOKEN_TTL,
            remember_ttl: REMEMBER_TTL,
            signer: TokenSigner::new(secret),
            uploads,
        }
    }

    /// Config with a per-process random secret (for development)
    pub fn with_random_secret(uploads: UploadStore) -> Self {
        Self::new(&random_bytes(32), uploads)
    }

    /// Lifetime of a token issued at login
    pub fn token_lifetime(&self, remember: bool) -> Duration {
        if remember {
            self.remember_ttl
        } else {
            self.token_ttl
        }
    }
}
