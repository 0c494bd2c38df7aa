use agrohub_core::{AppError, envelope};
use anyhow::anyhow;
use axum::extract::State;
use axum::response::Response;
use serde_json::json;
use tracing::{instrument, warn};

use super::model::HealthStatus;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service and database are reachable", body = crate::docs::HealthEnvelope),
        (status = 503, description = "Database is unreachable", body = crate::docs::ErrorEnvelope)
    ),
    tag = "Health"
)]
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Result<Response, AppError> {
    if let Err(e) = agrohub_db::ping(&state.db).await {
        warn!(error = %e, "Database health probe failed");
        return Err(
            AppError::service_unavailable(anyhow!("Database is unreachable"))
                .with_details(json!({ "database": "down" })),
        );
    }

    Ok(envelope::success(
        HealthStatus::healthy(),
        Some("Service is healthy"),
        None,
    ))
}
