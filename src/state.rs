use agrohub_config::{CorsConfig, DatabaseConfig};
use agrohub_db::{PgPool, init_lazy_pool};
use agrohub_observability::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cors_config: CorsConfig,
    pub metrics: Option<PrometheusHandle>,
}

/// Builds the shared state. The pool connects lazily, so a missing database
/// shows up in `/api/health` rather than aborting start-up.
pub fn init_app_state(
    database: &DatabaseConfig,
    cors_config: CorsConfig,
    metrics: Option<PrometheusHandle>,
) -> anyhow::Result<AppState> {
    Ok(AppState {
        db: init_lazy_pool(database)?,
        cors_config,
        metrics,
    })
}
