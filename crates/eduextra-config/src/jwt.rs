//! Token signing configuration.
//!
//! # Environment Variables
//!
//! - `JWT_SECRET`: signing secret, at least 32 bytes
//! - `JWT_ACCESS_EXPIRY`: access token lifetime in seconds (default: 3600)
//! - `JWT_REFRESH_EXPIRY`: refresh token lifetime in seconds (default: 604800)

use std::env;

use crate::ConfigError;

/// Development fallback used when `JWT_SECRET` is unset.
pub const DEFAULT_SECRET: &str = "eduextra-development-secret-change-me-in-production";

/// Minimum accepted secret length in bytes.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_SECRET.to_string()),
            access_token_expiry: env::var("JWT_ACCESS_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600), // 1 hour
            refresh_token_expiry: env::var("JWT_REFRESH_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(604800), // 7 days
        }
    }

    /// True when the secret is the built-in development fallback.
    pub fn uses_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }

    /// Checks the invariants the token service relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::SecretTooShort {
                len: self.secret.len(),
                min: MIN_SECRET_LEN,
            });
        }
        if self.access_token_expiry <= 0 {
            return Err(ConfigError::NonPositiveTtl("JWT_ACCESS_EXPIRY"));
        }
        if self.refresh_token_expiry <= 0 {
            return Err(ConfigError::NonPositiveTtl("JWT_REFRESH_EXPIRY"));
        }
        if self.refresh_token_expiry <= self.access_token_expiry {
            return Err(ConfigError::RefreshNotLonger {
                access: self.access_token_expiry,
                refresh: self.refresh_token_expiry,
            });
        }
        Ok(())
    }
}

// The secret must never end up in logs.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(access: i64, refresh: i64) -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: access,
            refresh_token_expiry: refresh,
        }
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(config(3600, 604800).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_secret() {
        let mut cfg = config(3600, 604800);
        cfg.secret = "short".to_string();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::SecretTooShort { len: 5, min: MIN_SECRET_LEN })
        ));
    }

    #[test]
    fn test_validate_rejects_refresh_not_longer_than_access() {
        assert!(matches!(
            config(3600, 3600).validate(),
            Err(ConfigError::RefreshNotLonger { .. })
        ));
        assert!(matches!(
            config(0, 3600).validate(),
            Err(ConfigError::NonPositiveTtl("JWT_ACCESS_EXPIRY"))
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", config(3600, 604800));
        assert!(!rendered.contains("test-secret-key"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_default_secret_is_long_enough() {
        assert!(DEFAULT_SECRET.len() >= MIN_SECRET_LEN);
    }
}
