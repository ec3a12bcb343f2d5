use std::sync::Arc;

use tracing::{info, warn};

use eduextra_auth::{Clock, KeyError, SystemClock, TokenService};
use eduextra_config::JwtConfig;
use eduextra_core::{BcryptVerifier, CredentialVerifier};
use eduextra_db::{init_db_pool, run_migrations};

use crate::middleware::auth::AccessGuard;
use crate::modules::auth::service::AuthService;
use crate::modules::users::directory::UserDirectory;
use crate::modules::users::repository::PgUserDirectory;
use crate::modules::users::service::UserService;

/// Shared, read-only application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub guard: AccessGuard,
    pub auth_service: Arc<AuthService>,
    pub user_service: UserService,
}

impl AppState {
    /// Wires the services around the given collaborators. Tests pass an
    /// in-memory directory and a manual clock here.
    pub fn new(
        jwt_config: JwtConfig,
        users: Arc<dyn UserDirectory>,
        credentials: Arc<dyn CredentialVerifier>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, KeyError> {
        let tokens = Arc::new(TokenService::from_config(&jwt_config, clock)?);

        Ok(Self {
            guard: AccessGuard::new(Arc::clone(&tokens)),
            auth_service: Arc::new(AuthService::new(
                Arc::clone(&users),
                credentials,
                Arc::clone(&tokens),
            )),
            user_service: UserService::new(users),
            tokens,
        })
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let jwt_config = JwtConfig::from_env();
    jwt_config.validate()?;

    if jwt_config.uses_default_secret() {
        warn!("JWT_SECRET is not set; using the development secret. Do not run this in production");
    }

    let pool = init_db_pool().await;
    run_migrations(&pool).await?;
    info!("Database migrations applied");

    let state = AppState::new(
        jwt_config,
        Arc::new(PgUserDirectory::new(pool)),
        Arc::new(BcryptVerifier::new()),
        Arc::new(SystemClock),
    )?;

    info!(
        access_ttl_secs = state.tokens.access_ttl().num_seconds(),
        refresh_ttl_secs = state.tokens.refresh_ttl().num_seconds(),
        "Token service ready"
    );

    Ok(state)
}
