//! # EduExtra Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token signing secret and lifetimes
//! - [`server`]: listener address
//!
//! Configuration is read once at process start; there is no hot reload.
//!
//! # Example
//!
//! ```ignore
//! use eduextra_config::{JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! jwt_config.validate()?;
//! let server_config = ServerConfig::from_env();
//! ```

pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use jwt::JwtConfig;
pub use server::ServerConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("JWT_SECRET must be at least {min} bytes (got {len})")]
    SecretTooShort { len: usize, min: usize },
    #[error("{0} must be a positive number of seconds")]
    NonPositiveTtl(&'static str),
    #[error(
        "JWT_REFRESH_EXPIRY ({refresh}s) must be longer than JWT_ACCESS_EXPIRY ({access}s)"
    )]
    RefreshNotLonger { access: i64, refresh: i64 },
}
