//! Register, login and refresh flows.
//!
//! [`AuthService`] drives the user directory, the credential verifier and the
//! token service. Password hashing and comparison run on the blocking pool.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tokio::task;
use tracing::{debug, info, instrument, warn};

use eduextra_auth::{TokenKind, TokenPair, TokenService};
use eduextra_core::CredentialVerifier;

use crate::metrics::{
    track_token_rejected, track_tokens_issued, track_user_login_failure,
    track_user_login_success, track_user_registered,
};
use crate::modules::users::directory::UserDirectory;
use crate::modules::users::model::{NewUser, User};

use super::error::{AuthError, CredentialFailure};
use super::model::{AuthResponse, LoginRequest, RegisterRequest};

const DUMMY_PASSWORD: &str = "eduextra-unknown-account";

pub struct AuthService {
    users: Arc<dyn UserDirectory>,
    credentials: Arc<dyn CredentialVerifier>,
    tokens: Arc<TokenService>,
    /// Hash compared against when the email is unknown, built on first use
    /// with the verifier's own cost.
    dummy_hash: OnceCell<String>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        credentials: Arc<dyn CredentialVerifier>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            users,
            credentials,
            tokens,
            dummy_hash: OnceCell::new(),
        }
    }

    #[instrument(skip(self, dto), fields(email = %dto.email))]
    pub async fn register(&self, dto: RegisterRequest) -> Result<AuthResponse, AuthError> {
        if self.users.exists_by_email(&dto.email).await? {
            warn!(email = %dto.email, "Registration rejected: email already exists");
            return Err(AuthError::DuplicateEmail);
        }

        let role = dto.role.unwrap_or_default();
        let password_hash = self.hash_password(dto.password).await?;

        // The unique constraint still catches a concurrent registration.
        let user = self
            .users
            .insert(NewUser {
                full_name: dto.full_name,
                email: dto.email,
                role,
                password_hash,
            })
            .await?;

        track_user_registered(role.as_str());
        info!(user_id = %user.id, email = %user.email, role = %role, "User registered");

        let pair = self.issue_pair(&user)?;
        Ok(AuthResponse::new(pair, user))
    }

    #[instrument(skip(self, dto), fields(email = %dto.email))]
    pub async fn login(&self, dto: LoginRequest) -> Result<AuthResponse, AuthError> {
        let Some(user) = self.users.find_by_email(&dto.email).await? else {
            // Unknown emails pay for one comparison, same as a wrong password.
            self.compare_with_dummy(dto.password).await?;
            return Err(self.login_failed(&dto.email, CredentialFailure::UnknownEmail));
        };

        if !self
            .password_matches(dto.password, user.password_hash.clone())
            .await?
        {
            return Err(self.login_failed(&dto.email, CredentialFailure::WrongPassword));
        }

        if !user.is_active {
            track_user_login_failure("account_disabled");
            warn!(user_id = %user.id, "Login rejected: account disabled");
            return Err(AuthError::AccountDisabled);
        }

        track_user_login_success(user.role.as_str());
        info!(user_id = %user.id, role = %user.role, "User logged in");

        let pair = self.issue_pair(&user)?;
        Ok(AuthResponse::new(pair, user))
    }

    /// Exchanges a refresh token for a new pair carrying the user's current
    /// role. The presented token is not revoked.
    #[instrument(skip_all)]
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthResponse, AuthError> {
        let claims = self.tokens.validate(refresh_token).map_err(|e| {
            track_token_rejected(e.reason());
            debug!(reason = e.reason(), "Refresh rejected: invalid token");
            AuthError::InvalidRefreshToken
        })?;

        if claims.kind() != TokenKind::Refresh {
            track_token_rejected("wrong_kind");
            debug!(kind = %claims.kind(), "Refresh rejected: not a refresh token");
            return Err(AuthError::InvalidRefreshToken);
        }

        let Some(user) = self.users.find_by_email(claims.subject()).await? else {
            warn!(subject = %claims.subject(), "Refresh rejected: unknown subject");
            return Err(AuthError::InvalidRefreshToken);
        };

        if !user.is_active {
            warn!(user_id = %user.id, "Refresh rejected: account disabled");
            return Err(AuthError::InvalidRefreshToken);
        }

        if user.role != claims.role() {
            info!(
                user_id = %user.id,
                previous = %claims.role(),
                current = %user.role,
                "Role changed since last issuance"
            );
        }

        let pair = self.issue_pair(&user)?;
        Ok(AuthResponse::new(pair, user))
    }

    fn issue_pair(&self, user: &User) -> Result<TokenPair, AuthError> {
        let pair = self.tokens.issue_pair(&user.email, user.role)?;
        track_tokens_issued(TokenKind::Access.as_str());
        track_tokens_issued(TokenKind::Refresh.as_str());
        Ok(pair)
    }

    fn login_failed(&self, email: &str, failure: CredentialFailure) -> AuthError {
        track_user_login_failure(failure.as_str());
        warn!(email = %email, reason = %failure, "Login rejected: invalid credentials");
        AuthError::InvalidCredentials(failure)
    }

    async fn compare_with_dummy(&self, raw_password: String) -> Result<(), AuthError> {
        let dummy = self
            .dummy_hash
            .get_or_try_init(|| self.hash_password(DUMMY_PASSWORD.to_string()))
            .await?
            .clone();
        self.password_matches(raw_password, dummy).await?;
        Ok(())
    }

    async fn hash_password(&self, raw_password: String) -> Result<String, AuthError> {
        let credentials = Arc::clone(&self.credentials);
        let hashed = task::spawn_blocking(move || credentials.hash(&raw_password))
            .await
            .map_err(anyhow::Error::new)??;
        Ok(hashed)
    }

    async fn password_matches(
        &self,
        raw_password: String,
        password_hash: String,
    ) -> Result<bool, AuthError> {
        let credentials = Arc::clone(&self.credentials);
        let matches =
            task::spawn_blocking(move || credentials.matches(&raw_password, &password_hash))
                .await
                .map_err(anyhow::Error::new)??;
        Ok(matches)
    }
}
