//! Password hashing and verification.
//!
//! Thin wrappers over bcrypt used by the operator CLI and by whichever service
//! stores credentials. Failures map to [`AppError::internal`].

use anyhow::anyhow;
use bcrypt::{hash, verify};

pub use bcrypt::DEFAULT_COST;

use crate::errors::AppError;

/// Hashes `password` with bcrypt at the default cost.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash_password_with_cost(password, DEFAULT_COST)
}

/// Hashes `password` with an explicit bcrypt cost (4 to 31).
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost).map_err(|e| AppError::internal(anyhow!("Failed to hash password: {e}")))
}

/// Checks `password` against a stored bcrypt hash.
///
/// Returns `Ok(false)` on mismatch and `Err` when `hash` is not a bcrypt hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash).map_err(|e| AppError::internal(anyhow!("Failed to verify password: {e}")))
}
