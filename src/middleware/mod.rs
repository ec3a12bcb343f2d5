//! Middleware and extractors for authentication and authorization.
//!
//! # Modules
//!
//! - [`auth`]: [`AccessGuard`](auth::AccessGuard), guard errors and the [`AuthUser`](auth::AuthUser) extractor
//! - [`role`]: role-checking route layers
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <access token>` header
//! 2. The guard verifies the token and builds a `Principal` (email + role)
//! 3. Role layers check the principal's role and store it in the request extensions
//! 4. Handler executes if all checks pass
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//! use crate::middleware::role::require_admin;
//!
//! // Any valid access token
//! async fn get_profile(auth_user: AuthUser) -> impl IntoResponse {
//!     let email = auth_user.email();
//!     // ...
//! }
//!
//! // ADMIN only
//! let admin_routes = Router::new()
//!     .route("/{id}/disable", patch(disable_user))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
//! ```

pub mod auth;
pub mod role;
