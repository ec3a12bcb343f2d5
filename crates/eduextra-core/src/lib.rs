//! # EduExtra Core
//!
//! Foundational types shared across the EduExtra API:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: bcrypt hashing and the [`CredentialVerifier`] seam
//!
//! # Example
//!
//! ```ignore
//! use eduextra_core::{AppError, BcryptVerifier, CredentialVerifier};
//!
//! let verifier = BcryptVerifier::new();
//! let hash = verifier.hash("secure_password")?;
//! assert!(verifier.matches("secure_password", &hash)?);
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use password::{
    BcryptVerifier, CredentialVerifier, MAX_PASSWORD_BYTES, hash_password, verify_password,
};
