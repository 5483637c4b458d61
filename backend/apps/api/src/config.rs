//! Application Configuration
//!
//! Everything the binary reads from the environment, resolved once at
//! startup. `.env` has already been loaded by `dotenvy` at this point.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use auth::AuthConfig;
use platform::config::{ConfigError, Env};
use platform::cookie::CookieConfig;
use platform::upload::UploadStore;
use url::Url;
use web::{FlashStore, WebContext};

/// `APP_*` settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: String,
    pub host: IpAddr,
    pub port: u16,
    pub debug: bool,
}

impl AppSettings {
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Resolved configuration of the server
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database_url: String,
    pub upload_dir: PathBuf,
    pub auth: AuthConfig,
    /// No `JWT_SECRET` outside production: tokens die with the process
    pub ephemeral_secret: bool,
    pub web: WebContext,
}

impl AppConfig {
    pub fn from_env<F>(env: &Env<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app = AppSettings {
            name: env.string("APP_NAME", "Application"),
            env: env.string("APP_ENV", "production"),
            host: env.parse("APP_HOST", IpAddr::from([0, 0, 0, 0]))?,
            port: env.parse("APP_PORT", 8080)?,
            debug: env.bool("APP_DEBUG", false)?,
        };

        let upload_dir = PathBuf::from(env.string("UPLOAD_DIR", "uploads"));
        let uploads = UploadStore::new(upload_dir.clone());

        let secret = env.optional("JWT_SECRET");
        let ephemeral_secret = secret.is_none();
        let mut auth = match secret {
            Some(secret) => AuthConfig::new(secret.as_bytes(), uploads),
            None if app.is_production() => {
                return Err(ConfigError::Missing {
                    key: "JWT_SECRET".to_string(),
                });
            }
            None => AuthConfig::with_random_secret(uploads),
        };
        auth.token_ttl = Duration::from_secs(env.parse("JWT_EXPIRED", 7200)?);
        auth.cookie = CookieConfig {
            name: env.string("COOKIE_NAME", "auth_token"),
            path: env.string("COOKIE_PATH", "/"),
            secure: env.bool("COOKIE_SECURE", false)?,
            ..CookieConfig::default()
        };

        let web = WebContext {
            app_name: app.name.clone(),
            production: app.is_production(),
            flash: FlashStore::new(env.string("SESSION_STORE_NAME", "session_store")),
        };

        Ok(Self {
            database_url: database_url(env)?,
            upload_dir,
            auth,
            ephemeral_secret,
            web,
            app,
        })
    }
}

/// `DATABASE_URL`, or a URL assembled from the `DB_*` parts
fn database_url<F>(env: &Env<F>) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = env.optional("DATABASE_URL") {
        return Ok(url);
    }

    let host = env.string("DB_HOST", "localhost");
    let invalid = |key: &str, value: &str| ConfigError::Invalid {
        key: key.to_string(),
        value: value.to_string(),
    };

    let mut url = Url::parse(&format!("postgres://{host}")).map_err(|_| invalid("DB_HOST", &host))?;
    let username = env.string("DB_USERNAME", "postgres");
    url.set_username(&username)
        .map_err(|_| invalid("DB_USERNAME", &username))?;
    if let Some(password) = env.optional("DB_PASSWORD") {
        url.set_password(Some(&password))
            .map_err(|_| invalid("DB_PASSWORD", "***"))?;
    }
    url.set_port(Some(env.parse("DB_PORT", 5432)?))
        .map_err(|_| invalid("DB_PORT", ""))?;
    let database = env.string("DB_DATABASE", "employees");
    url.set_path(&format!("/{}", database.trim_start_matches('/')));

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_env(&Env::from_fn(move |key| map.get(key).cloned()))
    }

    #[test]
    fn test_production_requires_jwt_secret() {
        let err = config(&[]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Missing {
                key: "JWT_SECRET".to_string()
            }
        );
    }

    #[test]
    fn test_defaults() {
        let config = config(&[("JWT_SECRET", "s3cret")]).unwrap();

        assert_eq!(config.app.name, "Application");
        assert!(config.app.is_production());
        assert_eq!(config.app.addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.auth.token_ttl, Duration::from_secs(7200));
        assert_eq!(config.auth.cookie.name, "auth_token");
        assert!(!config.auth.cookie.secure);
        assert_eq!(config.web.flash.cookie_name(), "session_store");
        assert!(config.web.production);
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.database_url, "postgres://postgres@localhost:5432/employees");
    }

    #[test]
    fn test_development_overrides() {
        let config = config(&[
            ("APP_ENV", "development"),
            ("APP_NAME", "Employees"),
            ("APP_PORT", "3000"),
            ("JWT_EXPIRED", "60"),
            ("COOKIE_NAME", "sid"),
            ("COOKIE_SECURE", "true"),
            ("DB_HOST", "db"),
            ("DB_PASSWORD", "p@ss"),
            ("DB_DATABASE", "staff"),
        ])
        .unwrap();

        assert!(!config.web.production);
        assert!(config.ephemeral_secret);
        assert_eq!(config.web.app_name, "Employees");
        assert_eq!(config.app.port, 3000);
        assert_eq!(config.auth.token_ttl, Duration::from_secs(60));
        assert_eq!(config.auth.cookie.name, "sid");
        assert!(config.auth.cookie.secure);
        assert_eq!(config.database_url, "postgres://postgres:p%40ss@db:5432/staff");
    }

    #[test]
    fn test_database_url_wins() {
        let config = config(&[
            ("JWT_SECRET", "s3cret"),
            ("DATABASE_URL", "postgres://app@pg/app"),
            ("DB_HOST", "ignored"),
        ])
        .unwrap();
        assert_eq!(config.database_url, "postgres://app@pg/app");
    }

    #[test]
    fn test_invalid_port() {
        let err = config(&[("JWT_SECRET", "s3cret"), ("APP_PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key, .. } if key == "APP_PORT"));
    }
}
