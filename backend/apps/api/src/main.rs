//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; page handlers fail with
//! `web::WebError` and are answered by the error translator.

mod app;
mod config;

use std::net::SocketAddr;
use std::time::Duration;

use axum::ServiceExt;
use axum::extract::Request;
use platform::config::Env;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{AppConfig, AppSettings};

/// Log filter when `RUST_LOG` is unset
fn default_filter(app: &AppSettings) -> &'static str {
    if app.debug {
        "api=debug,auth=debug,employee=debug,web=debug,tower_http=debug"
    } else {
        "api=info,auth=info,employee=info,web=info,tower_http=info"
    }
}

fn init_tracing(app: &AppSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(app).into());
    let registry = tracing_subscriber::registry().with(filter);

    if app.is_production() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env(&Env::process())?;
    init_tracing(&config.app);

    if config.ephemeral_secret {
        tracing::warn!("JWT_SECRET is not set, using a random per-process secret");
    }

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .min_connections(5)
        .idle_timeout(Duration::from_secs(5 * 60))
        .max_lifetime(Duration::from_secs(5 * 60))
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let app = app::service(app::router(pool, &config));

    // Start server
    let addr = config.app.addr();
    tracing::info!(app = %config.app.name, env = %config.app.env, "Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
