use agrohub_core::password::{hash_password_with_cost, verify_password};
use anyhow::{Result, bail};

/// Outcome of checking a password against a stored hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Match,
    Mismatch,
}

/// Hashes `password` and immediately verifies the new hash against it.
pub fn generate_hash(password: &str, cost: u32) -> Result<String> {
    let hash = hash_password_with_cost(password, cost).map_err(|e| e.error)?;

    if !verify_password(password, &hash).map_err(|e| e.error)? {
        bail!("Freshly generated hash did not verify");
    }

    Ok(hash)
}

/// Compares `password` with `hash`. Errors when `hash` is not a bcrypt hash.
pub fn check_hash(password: &str, hash: &str) -> Result<Verdict> {
    let matches = verify_password(password, hash.trim()).map_err(|e| e.error)?;

    Ok(if matches {
        Verdict::Match
    } else {
        Verdict::Mismatch
    })
}
