use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use eduextra_core::AppError;

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{AuthResponse, LoginRequest, RefreshTokenRequest, RegisterRequest};

/// Register a new user and sign them in.
#[instrument(skip_all)]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let response = state.auth_service.register(dto).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip_all)]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let response = state.auth_service.login(dto).await?;
    Ok(Json(response))
}

/// Exchange a refresh token for a new token pair.
#[instrument(skip_all)]
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RefreshTokenRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let response = state.auth_service.refresh(&dto.refresh_token).await?;
    Ok(Json(response))
}
