use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use tracing::debug;

use eduextra_auth::{Principal, Role, TokenKind, TokenService};
use eduextra_core::AppError;

use crate::metrics::track_token_rejected;
use crate::state::AppState;

const BEARER_SCHEME: &str = "Bearer";

/// Why a request was turned away at the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GuardError {
    #[error("Missing authorization token")]
    MissingToken,
    #[error("Invalid or expired token")]
    Unauthenticated,
    #[error("Access denied")]
    Forbidden,
}

impl From<GuardError> for AppError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::MissingToken | GuardError::Unauthenticated => AppError::unauthorized(err),
            GuardError::Forbidden => AppError::forbidden(err),
        }
    }
}

/// Validates bearer tokens and checks role requirements.
///
/// Only access tokens authenticate requests; refresh tokens are accepted by
/// the refresh flow alone.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    tokens: Arc<TokenService>,
}

impl AccessGuard {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    /// Resolves the `Authorization` header value into a principal.
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<Principal, GuardError> {
        let value = authorization
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(GuardError::MissingToken)?;

        let (scheme, token) = value.split_once(' ').unwrap_or((value, ""));
        if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
            return Err(GuardError::Unauthenticated);
        }

        let token = token.trim();
        if token.is_empty() {
            return Err(GuardError::MissingToken);
        }

        let claims = self.tokens.validate(token).map_err(|e| {
            track_token_rejected(e.reason());
            debug!(reason = e.reason(), "Bearer token rejected");
            GuardError::Unauthenticated
        })?;

        if claims.kind() != TokenKind::Access {
            track_token_rejected("wrong_kind");
            debug!(kind = %claims.kind(), "Bearer token rejected: not an access token");
            return Err(GuardError::Unauthenticated);
        }

        Ok(claims.into_principal())
    }

    /// Exact membership; an empty `required_roles` admits nobody.
    pub fn authorize(principal: &Principal, required_roles: &[Role]) -> Result<(), GuardError> {
        if required_roles.contains(&principal.role) {
            Ok(())
        } else {
            debug!(
                subject = %principal.subject,
                role = %principal.role,
                required = ?required_roles,
                "Authorization denied"
            );
            Err(GuardError::Forbidden)
        }
    }
}

/// The raw `Authorization` header, if present. Non-UTF-8 values are rejected.
pub fn authorization_header(headers: &HeaderMap) -> Result<Option<&str>, GuardError> {
    headers
        .get(header::AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| GuardError::Unauthenticated))
        .transpose()
}

/// Extractor that yields the authenticated principal.
///
/// Reuses the principal stored by [`require_roles`](crate::middleware::role::require_roles)
/// when a role layer already ran, otherwise validates the bearer token itself.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl AuthUser {
    pub fn email(&self) -> &str {
        &self.0.subject
    }

    pub fn role(&self) -> Role {
        self.0.role
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(principal) = parts.extensions.get::<Principal>() {
            return Ok(AuthUser(principal.clone()));
        }

        let header = authorization_header(&parts.headers)?;
        let principal = state.guard.authenticate(header)?;

        Ok(AuthUser(principal))
    }
}
