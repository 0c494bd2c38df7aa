//! Connectivity diagnostics for `agrohub-cli check-db`.
//!
//! Acquires one connection, asks the server for its clock, version and the
//! tables in the `public` schema, then releases the connection back to the
//! pool.

use std::fmt;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticReport {
    pub server_time: DateTime<Utc>,
    pub server_version: String,
    pub tables: Vec<String>,
    pub pool_size: u32,
    pub idle_connections: usize,
    pub elapsed: Duration,
}

#[instrument(skip(pool))]
pub async fn run_diagnostics(pool: &PgPool) -> Result<DiagnosticReport, sqlx::Error> {
    let start = Instant::now();
    let mut conn = pool.acquire().await?;
    debug!("Connection acquired");

    let server_time: DateTime<Utc> = sqlx::query_scalar("SELECT NOW()")
        .fetch_one(&mut *conn)
        .await?;

    let server_version: String = sqlx::query_scalar("SELECT version()")
        .fetch_one(&mut *conn)
        .await?;

    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT table_name::text FROM information_schema.tables
         WHERE table_schema = 'public'
         ORDER BY table_name",
    )
    .fetch_all(&mut *conn)
    .await?;

    drop(conn);
    debug!("Connection released");

    Ok(DiagnosticReport {
        server_time,
        server_version,
        tables,
        pool_size: pool.size(),
        idle_connections: pool.num_idle(),
        elapsed: start.elapsed(),
    })
}

/// Runs [`run_diagnostics`] and closes `pool` whatever the outcome.
pub async fn diagnose_and_close(pool: &PgPool) -> Result<DiagnosticReport, sqlx::Error> {
    let report = run_diagnostics(pool).await;
    pool.close().await;
    debug!("Pool closed");
    report
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Server time:  {}", self.server_time.to_rfc3339())?;
        writeln!(f, "Version:      {}", self.server_version)?;
        writeln!(
            f,
            "Pool:         {} open, {} idle",
            self.pool_size, self.idle_connections
        )?;
        writeln!(f, "Round trip:   {} ms", self.elapsed.as_millis())?;

        if self.tables.is_empty() {
            write!(f, "Tables:       (none in public schema)")
        } else {
            write!(f, "Tables:       {}", self.tables.join(", "))
        }
    }
}
