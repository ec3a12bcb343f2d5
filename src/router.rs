use axum::http::header::AUTHORIZATION;
use axum::{Router, middleware};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;

use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::modules::auth::router::init_auth_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest("/users", init_users_router(state.clone())),
        )
        .with_state(state)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(SetSensitiveRequestHeadersLayer::new([AUTHORIZATION]))
}
