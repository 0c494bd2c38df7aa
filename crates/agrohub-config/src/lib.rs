//! # AgroHub Config
//!
//! Configuration types for the AgroHub API and its operator tools.
//!
//! Every structure is loaded from environment variables (a `.env` file is
//! honoured by the binaries through `dotenvy`):
//!
//! - [`server`]: Listen address for the HTTP host
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: PostgreSQL connection settings
//!
//! # Example
//!
//! ```ignore
//! use agrohub_config::{CorsConfig, DatabaseConfig, ServerConfig};
//!
//! let server = ServerConfig::from_env();
//! let cors = CorsConfig::from_env();
//! let database = DatabaseConfig::from_env();
//! ```

use std::str::FromStr;

pub mod cors;
pub mod database;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Parses `value` or falls back to `default` when absent or unparsable.
pub(crate) fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}
