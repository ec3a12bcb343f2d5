use std::fmt;

use eduextra_auth::TokenError;
use eduextra_core::AppError;

use crate::modules::users::directory::DirectoryError;

/// Why a login was refused. Both variants reach the client as the same
/// message; the distinction only feeds logs and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialFailure {
    UnknownEmail,
    WrongPassword,
}

impl CredentialFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialFailure::UnknownEmail => "unknown_email",
            CredentialFailure::WrongPassword => "wrong_password",
        }
    }
}

impl fmt::Display for CredentialFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Email already exists")]
    DuplicateEmail,
    #[error("Invalid email or password")]
    InvalidCredentials(CredentialFailure),
    #[error("Account is disabled")]
    AccountDisabled,
    #[error("Invalid refresh token")]
    InvalidRefreshToken,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<DirectoryError> for AuthError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::DuplicateEmail => AuthError::DuplicateEmail,
            other => AuthError::Internal(other.into()),
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        AuthError::Internal(anyhow::Error::new(err).context("Failed to issue tokens"))
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.error)
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::DuplicateEmail => AppError::conflict(err),
            AuthError::InvalidCredentials(_) => AppError::unauthorized(err),
            AuthError::AccountDisabled => AppError::forbidden(err),
            AuthError::InvalidRefreshToken => AppError::unauthorized(err),
            AuthError::Internal(inner) => AppError::internal(inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AuthError::DuplicateEmail, StatusCode::CONFLICT),
            (
                AuthError::InvalidCredentials(CredentialFailure::UnknownEmail),
                StatusCode::UNAUTHORIZED,
            ),
            (AuthError::AccountDisabled, StatusCode::FORBIDDEN),
            (AuthError::InvalidRefreshToken, StatusCode::UNAUTHORIZED),
            (
                AuthError::Internal(anyhow::anyhow!("pool timed out")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status, status);
        }
    }

    #[test]
    fn test_credential_failures_share_client_message() {
        let unknown = AppError::from(AuthError::InvalidCredentials(
            CredentialFailure::UnknownEmail,
        ));
        let wrong = AppError::from(AuthError::InvalidCredentials(
            CredentialFailure::WrongPassword,
        ));
        assert_eq!(unknown.client_message(), wrong.client_message());
        assert_eq!(unknown.client_message(), "Invalid email or password");
    }

    #[test]
    fn test_internal_details_hidden_from_client() {
        let err = AppError::from(AuthError::Internal(anyhow::anyhow!("pool timed out")));
        assert_eq!(err.client_message(), "Internal server error");
    }

    #[test]
    fn test_directory_duplicate_maps_to_duplicate_email() {
        assert!(matches!(
            AuthError::from(DirectoryError::DuplicateEmail),
            AuthError::DuplicateEmail
        ));
        assert!(matches!(
            AuthError::from(DirectoryError::InvalidRecord("bad role".to_string())),
            AuthError::Internal(_)
        ));
    }
}
