//! The process-wide token signing key.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use eduextra_config::JwtConfig;

pub(crate) type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("signing secret must be at least {min} bytes (got {len})")]
    TooShort { len: usize, min: usize },
    #[error("signing secret could not be used as an HMAC key")]
    Invalid,
}

/// HMAC-SHA256 key built once at startup and shared read-only afterwards.
///
/// Only the keyed MAC state is retained, not the raw secret. `Debug` output is
/// redacted.
#[derive(Clone)]
pub struct SigningKey {
    mac: HmacSha256,
}

impl SigningKey {
    pub const MIN_LEN: usize = 32;

    pub fn new(secret: &[u8]) -> Result<Self, KeyError> {
        if secret.len() < Self::MIN_LEN {
            return Err(KeyError::TooShort {
                len: secret.len(),
                min: Self::MIN_LEN,
            });
        }

        let mac = HmacSha256::new_from_slice(secret).map_err(|_| KeyError::Invalid)?;
        Ok(Self { mac })
    }

    pub fn from_config(config: &JwtConfig) -> Result<Self, KeyError> {
        Self::new(config.secret.as_bytes())
    }

    /// Fresh MAC instance keyed with this secret.
    pub(crate) fn mac(&self) -> HmacSha256 {
        self.mac.clone()
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}
