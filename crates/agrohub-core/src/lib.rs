//! # AgroHub Core
//!
//! Core types, errors, and utilities for the AgroHub API.
//!
//! Every HTTP response produced by the AgroHub backend is wrapped in the same
//! JSON envelope. This crate owns that contract:
//!
//! - [`envelope`]: The response envelope and its three constructors
//!   ([`success`], [`paginated_success`], [`error`])
//! - [`pagination`]: Page metadata math and the pagination query extractor
//! - [`errors`]: Application error type rendered as an error envelope
//! - [`validator`]: JSON body extractor that runs `validator` rules
//! - [`password`]: Password hashing and verification (bcrypt)
//! - [`serde`]: Custom serde serialization/deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use agrohub_core::{error, paginated_success, success, PaginationParams};
//!
//! async fn list_products(params: PaginationParams) -> axum::response::Response {
//!     let (items, total) = fetch_products(params.offset(), params.page_size()).await;
//!     paginated_success(items, total, params.page(), params.page_size(), None)
//! }
//! ```

pub mod envelope;
pub mod errors;
pub mod pagination;
pub mod password;
pub mod serde;
pub mod validator;

// Re-export commonly used types at crate root
pub use envelope::{Envelope, error, paginated_success, success};
pub use errors::AppError;
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{hash_password, verify_password};
pub use self::validator::ValidatedJson;
