//! Role-based authorization for Axum routes.
//!
//! Routes are guarded with a `route_layer` built on [`require_roles`] (see
//! [`require_admin`]). Handlers behind the layer take an
//! [`AuthUser`](crate::middleware::auth::AuthUser), which reuses the principal
//! the layer already verified.
//!
//! Roles are compared by exact membership. `ADMIN` does not imply any other
//! role; list every role a route admits.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use eduextra_auth::Role;
use eduextra_core::AppError;

use crate::middleware::auth::{AccessGuard, authorization_header};
use crate::state::AppState;

/// Authenticates the request, checks the principal's role and stores the
/// [`Principal`](eduextra_auth::Principal) in the request extensions for
/// downstream extractors.
///
/// # Usage with axum::middleware::from_fn_with_state
///
/// ```rust,ignore
/// let coordinator_routes = Router::new()
///     .route("/reports", get(reports_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), |State(state): State<AppState>, req, next| async move {
///         require_roles(&state, req, next, &[Role::Admin, Role::Coordinator]).await
///     }));
/// ```
pub async fn require_roles(
    state: &AppState,
    mut req: Request,
    next: Next,
    allowed_roles: &[Role],
) -> Result<Response, AppError> {
    let principal = state.guard.authenticate(authorization_header(req.headers())?)?;
    AccessGuard::authorize(&principal, allowed_roles)?;

    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

/// Layer for ADMIN-only routes.
///
/// ```rust,ignore
/// let admin_routes = Router::new()
///     .route("/{id}/disable", patch(disable_user))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
/// ```
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(&state, req, next, &[Role::Admin]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}
