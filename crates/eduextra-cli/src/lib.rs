//! # EduExtra CLI
//!
//! Administrative helpers used by the `eduextra-cli` binary:
//!
//! - [`create_admin`]: bootstrap an ADMIN account directly in the database
//! - [`generate_secret`]: random signing secret for `JWT_SECRET`

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;
use rand::rngs::OsRng;
use sqlx::PgPool;
use uuid::Uuid;

use eduextra_auth::{Role, SigningKey};
use eduextra_core::{MAX_PASSWORD_BYTES, hash_password};

/// Default number of random bytes in a generated secret.
pub const DEFAULT_SECRET_BYTES: usize = 48;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("User with this email already exists")]
    DuplicateEmail,
    #[error("{0}")]
    InvalidInput(String),
    #[error("Failed to hash password: {0}")]
    Hashing(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Inserts an active ADMIN user and returns its id.
pub async fn create_admin(
    db: &PgPool,
    full_name: &str,
    email: &str,
    password: &str,
) -> Result<Uuid, CliError> {
    validate_admin_input(full_name, email, password)?;

    let hashed_password = hash_password(password).map_err(|e| CliError::Hashing(e.to_string()))?;

    let user_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (id, full_name, email, password, role, is_active)
         VALUES ($1, $2, $3, $4, $5, TRUE)
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(Uuid::new_v4())
    .bind(full_name.trim())
    .bind(email.trim())
    .bind(&hashed_password)
    .bind(Role::Admin.as_str())
    .fetch_optional(db)
    .await?;

    user_id.ok_or(CliError::DuplicateEmail)
}

fn validate_admin_input(full_name: &str, email: &str, password: &str) -> Result<(), CliError> {
    let name_len = full_name.trim().chars().count();
    if !(2..=100).contains(&name_len) {
        return Err(CliError::InvalidInput(
            "Full name must be between 2 and 100 characters".to_string(),
        ));
    }
    if !email.trim().contains('@') {
        return Err(CliError::InvalidInput("Invalid email format".to_string()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CliError::InvalidInput(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(CliError::InvalidInput(format!(
            "Password must not exceed {} bytes",
            MAX_PASSWORD_BYTES
        )));
    }
    Ok(())
}

/// Random URL-safe secret from `bytes` bytes of OS entropy.
pub fn generate_secret(bytes: usize) -> Result<String, CliError> {
    if bytes < SigningKey::MIN_LEN {
        return Err(CliError::InvalidInput(format!(
            "Secret must use at least {} random bytes",
            SigningKey::MIN_LEN
        )));
    }

    let mut buffer = vec![0u8; bytes];
    OsRng.fill_bytes(&mut buffer);
    Ok(URL_SAFE_NO_PAD.encode(buffer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_secret_is_long_enough_for_signing() {
        let secret = generate_secret(DEFAULT_SECRET_BYTES).unwrap();
        assert_eq!(secret.len(), 64);
        assert!(SigningKey::new(secret.as_bytes()).is_ok());
    }

    #[test]
    fn test_generate_secret_is_random() {
        assert_ne!(generate_secret(32).unwrap(), generate_secret(32).unwrap());
    }

    #[test]
    fn test_generate_secret_rejects_short_length() {
        assert!(matches!(generate_secret(16), Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_admin_input() {
        assert!(validate_admin_input("Ada Admin", "ada@x.com", "secret1").is_ok());
        assert!(validate_admin_input("A", "ada@x.com", "secret1").is_err());
        assert!(validate_admin_input("Ada Admin", "ada.x.com", "secret1").is_err());
        assert!(validate_admin_input("Ada Admin", "ada@x.com", "12345").is_err());
        assert!(validate_admin_input("Ada Admin", "ada@x.com", &"x".repeat(73)).is_err());
        assert!(validate_admin_input("Ada Admin", "ada@x.com", &"é".repeat(40)).is_err());
        assert!(validate_admin_input("Ada Admin", "ada@x.com", &"é".repeat(36)).is_ok());
    }
}
