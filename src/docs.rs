use agrohub_core::PaginationMeta;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::modules::health::model::HealthStatus;

/// Error envelope as documented in OpenAPI.
#[derive(Serialize, ToSchema)]
pub struct ErrorEnvelope {
    /// Always `false`
    pub ok: bool,
    pub message: String,
    /// Present only when the server has diagnostic context to share
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
    /// ISO-8601 construction time
    pub timestamp: String,
}

/// Success envelope carrying a health report.
#[derive(Serialize, ToSchema)]
pub struct HealthEnvelope {
    /// Always `true`
    pub ok: bool,
    pub message: String,
    pub data: HealthStatus,
    /// ISO-8601 construction time
    pub timestamp: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(crate::modules::health::controller::health_check),
    components(schemas(ErrorEnvelope, HealthEnvelope, HealthStatus, PaginationMeta)),
    tags(
        (name = "Health", description = "Service and database health")
    ),
    info(
        title = "AgroHub API",
        description = "Agricultural management backend. Every response uses the shared envelope."
    )
)]
pub struct ApiDoc;
