//! AgroHub Observability
//!
//! Provides:
//! - Tracing subscriber set-up (console, rolling JSON files)
//! - HTTP request/response logging middleware
//! - Prometheus metrics collection and middleware
//!
//! At runtime, metrics can be switched off via the `OBSERVABILITY_ENABLED`
//! environment variable. Logging is always on.
//!
//! # Examples
//!
//! ```no_run
//! use agrohub_observability::{init_metrics, init_tracing};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     init_tracing()?;
//!     let _metrics = init_metrics()?;
//!     // ... application code ...
//!     Ok(())
//! }
//! ```

pub mod logging;
pub mod metrics;

pub use self::logging::{init_console_logging, init_tracing, logging_middleware};
pub use self::metrics::{init_metrics, is_observability_enabled, metrics_middleware, render_metrics};

pub use metrics_exporter_prometheus::PrometheusHandle;
