use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use eduextra_auth::{Role, TokenPair};
use eduextra_core::MAX_PASSWORD_BYTES;

use crate::modules::users::model::User;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 100, message = "Full name must be between 2 and 100 characters"))]
    pub full_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(
        length(min = 6, max = 72, message = "Password must be between 6 and 72 characters"),
        custom(function = "validate_password_bytes")
    )]
    pub password: String,
    /// Defaults to `STUDENT` when omitted.
    #[serde(default)]
    pub role: Option<Role>,
}

/// bcrypt only reads the first 72 bytes, so multibyte passwords are capped
/// by their encoded length as well.
fn validate_password_bytes(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        let mut error = ValidationError::new("password_bytes");
        error.message = Some("Password must not exceed 72 bytes".into());
        return Err(error);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Returned by register, login and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub full_name: String,
    pub email: String,
    pub role: Role,
}

impl AuthResponse {
    pub fn new(pair: TokenPair, user: User) -> Self {
        Self {
            access_token: pair.access_token.into_string(),
            refresh_token: pair.refresh_token.into_string(),
            full_name: user.full_name,
            email: user.email,
            role: user.role,
        }
    }
}
