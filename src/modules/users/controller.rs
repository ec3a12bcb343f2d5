use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;
use uuid::Uuid;

use eduextra_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::modules::users::model::UserResponse;
use crate::state::AppState;

/// Profile of the authenticated principal.
#[instrument(skip_all, fields(email = %auth_user.email(), role = %auth_user.role()))]
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    let profile = state.user_service.get_profile(auth_user.email()).await?;
    Ok(Json(profile))
}

/// ADMIN only; the role is enforced by the users router's `route_layer`.
#[instrument(skip_all, fields(admin = %admin.email(), user_id = %id))]
pub async fn enable_user(
    State(state): State<AppState>,
    admin: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.user_service.enable_user(id).await?;
    Ok(Json(user))
}

/// Disabled accounts can no longer log in or refresh.
#[instrument(skip_all, fields(admin = %admin.email(), user_id = %id))]
pub async fn disable_user(
    State(state): State<AppState>,
    admin: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.user_service.disable_user(id).await?;
    Ok(Json(user))
}
