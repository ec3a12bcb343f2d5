use axum::{
    Router, middleware,
    routing::{get, patch},
};

use crate::middleware::role::require_admin;
use crate::modules::users::controller::{disable_user, enable_user, get_profile};
use crate::state::AppState;

pub fn init_users_router(state: AppState) -> Router<AppState> {
    let admin_routes = Router::new()
        .route("/{id}/enable", patch(enable_user))
        .route("/{id}/disable", patch(disable_user))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/profile", get(get_profile))
        .merge(admin_routes)
}
