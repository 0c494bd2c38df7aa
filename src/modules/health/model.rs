use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            status: "ok",
            database: "up",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}
