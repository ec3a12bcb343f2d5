//! Token issuance and validation.
//!
//! [`TokenService`] is the only component that mints or validates tokens. It
//! holds the signing key, a clock and the two lifetimes, all immutable after
//! construction, so one instance is shared freely across request tasks.
//!
//! # Validation order
//!
//! 1. structure (`Malformed`)
//! 2. signature over the encoded claims (`BadSignature`)
//! 3. claim parsing (`Malformed`)
//! 4. expiry (`Expired`)
//!
//! Claims are never parsed, let alone trusted, before the signature checks
//! out. A forged claim set with a far-future `exp` is therefore reported as
//! `BadSignature`, not accepted.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use eduextra_auth::{Role, SystemClock, TokenService};
//! use eduextra_config::JwtConfig;
//!
//! let tokens = TokenService::from_config(&JwtConfig::from_env(), Arc::new(SystemClock))?;
//! let pair = tokens.issue_pair("jane@x.com", Role::Student)?;
//! let claims = tokens.validate(pair.access_token.as_str())?;
//! assert_eq!(claims.subject(), "jane@x.com");
//! ```

use std::sync::Arc;

use chrono::Duration;
use tracing::debug;

use eduextra_config::JwtConfig;

use crate::claims::{Claims, Role, SignedToken, TokenKind, TokenPair};
use crate::clock::Clock;
use crate::codec;
use crate::error::TokenError;
use crate::key::{KeyError, SigningKey};

pub struct TokenService {
    key: SigningKey,
    clock: Arc<dyn Clock>,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(
        key: SigningKey,
        clock: Arc<dyn Clock>,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            key,
            clock,
            access_ttl,
            refresh_ttl,
        }
    }

    /// Builds the service from configuration. Call [`JwtConfig::validate`]
    /// first to enforce the lifetime invariants.
    pub fn from_config(config: &JwtConfig, clock: Arc<dyn Clock>) -> Result<Self, KeyError> {
        Ok(Self::new(
            SigningKey::from_config(config)?,
            clock,
            Duration::seconds(config.access_token_expiry),
            Duration::seconds(config.refresh_token_expiry),
        ))
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    pub fn issue_access_token(&self, subject: &str, role: Role) -> Result<SignedToken, TokenError> {
        self.issue(subject, role, TokenKind::Access)
    }

    pub fn issue_refresh_token(
        &self,
        subject: &str,
        role: Role,
    ) -> Result<SignedToken, TokenError> {
        self.issue(subject, role, TokenKind::Refresh)
    }

    /// Issues an access and a refresh token from a single clock reading.
    pub fn issue_pair(&self, subject: &str, role: Role) -> Result<TokenPair, TokenError> {
        let now = self.clock.now().timestamp();
        Ok(TokenPair {
            access_token: self.issue_at(subject, role, TokenKind::Access, now)?,
            refresh_token: self.issue_at(subject, role, TokenKind::Refresh, now)?,
        })
    }

    /// Verifies a token and returns its claims.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let (encoded_claims, signature) = codec::split(token)?;

        if !codec::verify(encoded_claims, signature, &self.key) {
            return Err(TokenError::BadSignature);
        }

        let claims = codec::decode_claims(encoded_claims)?;

        if claims.is_expired_at(self.clock.now().timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    pub fn extract_subject(&self, token: &str) -> Result<String, TokenError> {
        self.validate(token)
            .map(|claims| claims.into_principal().subject)
    }

    /// `Ok(true)` only for a genuinely signed token past its expiry.
    /// Malformed and forged tokens are errors, not "expired".
    pub fn is_expired(&self, token: &str) -> Result<bool, TokenError> {
        match self.validate(token) {
            Ok(_) => Ok(false),
            Err(TokenError::Expired) => Ok(true),
            Err(e) => Err(e),
        }
    }

    fn issue(&self, subject: &str, role: Role, kind: TokenKind) -> Result<SignedToken, TokenError> {
        self.issue_at(subject, role, kind, self.clock.now().timestamp())
    }

    fn issue_at(
        &self,
        subject: &str,
        role: Role,
        kind: TokenKind,
        now: i64,
    ) -> Result<SignedToken, TokenError> {
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };

        let claims = Claims::new(subject, role, now, now + ttl.num_seconds(), kind);
        let token = codec::seal(&claims, &self.key)?;

        debug!(
            subject = %subject,
            role = %role,
            kind = %kind,
            expires_at = claims.expires_at(),
            "Issued token"
        );

        Ok(token)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("key", &self.key)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}
