pub mod auth;
pub mod users;

pub use self::auth::model::{AuthResponse, LoginRequest, RegisterRequest};
pub use self::users::model::{User, UserResponse};
