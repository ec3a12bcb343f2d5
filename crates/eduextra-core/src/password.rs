//! Password hashing and the credential verifier seam.
//!
//! bcrypt is intentionally slow. Callers on an async runtime must run
//! [`CredentialVerifier`] methods on the blocking pool
//! (`tokio::task::spawn_blocking`).

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

/// bcrypt ignores everything past this many bytes of input.
pub const MAX_PASSWORD_BYTES: usize = 72;

fn ensure_within_bcrypt_limit(password: &str) -> Result<(), AppError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AppError::unprocessable(anyhow::anyhow!(
            "Password must not exceed {} bytes",
            MAX_PASSWORD_BYTES
        )));
    }
    Ok(())
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    ensure_within_bcrypt_limit(password)?;
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to verify password: {}", e)))
}

/// Hashes raw passwords and compares them against stored hashes.
pub trait CredentialVerifier: Send + Sync {
    fn hash(&self, raw_password: &str) -> Result<String, AppError>;

    /// Constant-time comparison of `raw_password` against `password_hash`.
    fn matches(&self, raw_password: &str, password_hash: &str) -> Result<bool, AppError>;
}

/// bcrypt-backed [`CredentialVerifier`].
#[derive(Debug, Clone, Copy)]
pub struct BcryptVerifier {
    cost: u32,
}

impl BcryptVerifier {
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    /// Lower costs are only meant for tests.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialVerifier for BcryptVerifier {
    /// Rejects passwords longer than [`MAX_PASSWORD_BYTES`] instead of
    /// letting bcrypt truncate them.
    fn hash(&self, raw_password: &str) -> Result<String, AppError> {
        ensure_within_bcrypt_limit(raw_password)?;
        hash(raw_password, self.cost)
            .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to hash password: {}", e)))
    }

    fn matches(&self, raw_password: &str, password_hash: &str) -> Result<bool, AppError> {
        // No stored hash can come from a longer password, so only its prefix could match.
        if raw_password.len() > MAX_PASSWORD_BYTES {
            return Ok(false);
        }
        verify_password(raw_password, password_hash)
    }
}
