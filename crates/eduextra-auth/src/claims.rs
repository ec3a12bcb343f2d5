//! Token claim structures and the identity types derived from them.
//!
//! - [`Claims`]: the signed payload of every token
//! - [`Role`]: closed set of platform roles
//! - [`TokenKind`]: access vs. refresh
//! - [`SignedToken`] / [`TokenPair`]: what clients receive
//! - [`Principal`]: the authenticated identity attached to a request

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Platform roles.
///
/// Authorization compares roles by exact membership; there is no implied
/// hierarchy between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Coordinator,
    Teacher,
    Monitor,
    #[default]
    Student,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Coordinator,
        Role::Teacher,
        Role::Monitor,
        Role::Student,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Coordinator => "COORDINATOR",
            Role::Teacher => "TEACHER",
            Role::Monitor => "MONITOR",
            Role::Student => "STUDENT",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    /// Exact match on the wire name, the same rule serde applies.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// Distinguishes short-lived access tokens from long-lived refresh tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims embedded in every token.
///
/// Field order is the canonical serialization order, so the same claims
/// always encode to the same bytes. Unknown fields are rejected on decode.
///
/// # Fields
///
/// - `sub`: user email (subject)
/// - `role`: user role at issuance
/// - `iat`: issued-at, Unix seconds
/// - `exp`: expiry, Unix seconds; the token is valid while `now < exp`
/// - `typ`: access or refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Claims {
    sub: String,
    role: Role,
    iat: i64,
    exp: i64,
    typ: TokenKind,
}

impl Claims {
    pub fn new(
        subject: impl Into<String>,
        role: Role,
        issued_at: i64,
        expires_at: i64,
        kind: TokenKind,
    ) -> Self {
        Self {
            sub: subject.into(),
            role,
            iat: issued_at,
            exp: expires_at,
            typ: kind,
        }
    }

    pub fn subject(&self) -> &str {
        &self.sub
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn issued_at(&self) -> i64 {
        self.iat
    }

    pub fn expires_at(&self) -> i64 {
        self.exp
    }

    pub fn kind(&self) -> TokenKind {
        self.typ
    }

    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }

    pub fn into_principal(self) -> Principal {
        Principal {
            subject: self.sub,
            role: self.role,
        }
    }
}

/// Encoded claims plus signature: `<claims>.<signature>`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignedToken(String);

impl SignedToken {
    pub(crate) fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SignedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Bearer tokens are credentials; keep them out of debug output and logs.
impl fmt::Debug for SignedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SignedToken(<redacted>)")
    }
}

/// Tokens minted by one issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPair {
    pub access_token: SignedToken,
    pub refresh_token: SignedToken,
}

/// Authenticated identity attached to a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub subject: String,
    pub role: Role,
}
