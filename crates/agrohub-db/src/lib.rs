//! # AgroHub DB
//!
//! Database pool and connectivity utilities for the AgroHub API.
//!
//! This crate provides PostgreSQL pool initialisation with SQLx and the
//! diagnostics used by the operator CLI (`agrohub-cli check-db`).
//!
//! # Example
//!
//! ```ignore
//! use agrohub_config::DatabaseConfig;
//! use agrohub_db::init_db_pool;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
//!     agrohub_db::ping(&pool).await?;
//!     Ok(())
//! }
//! ```

use agrohub_config::DatabaseConfig;
use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use tracing::{debug, info};

pub mod diagnostics;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

pub use diagnostics::{DiagnosticReport, diagnose_and_close, run_diagnostics};

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.connect_timeout)
}

/// Connects a PostgreSQL pool, failing fast if the server is unreachable.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let url = config.url()?;
    info!(database = %redact_url(url), "Connecting to database");

    pool_options(config)
        .connect(url)
        .await
        .with_context(|| format!("Failed to connect to database at {}", redact_url(url)))
}

/// Creates a pool that connects on first use.
///
/// The HTTP host starts with this so it can report an unhealthy database
/// instead of refusing to boot.
pub fn init_lazy_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let url = config.url()?;
    debug!(database = %redact_url(url), "Creating lazy database pool");

    pool_options(config)
        .connect_lazy(url)
        .with_context(|| format!("Invalid database URL {}", redact_url(url)))
}

/// Round-trips `SELECT 1` through the pool.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|_| ())
}

/// Masks the password in a connection string for logging.
///
/// `postgres://agro:secret@db:5432/agrohub` becomes
/// `postgres://agro:***@db:5432/agrohub`.
pub fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((userinfo, host)) = rest.rsplit_once('@') else {
        return url.to_string();
    };

    match userinfo.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:***@{host}"),
        None => url.to_string(),
    }
}
