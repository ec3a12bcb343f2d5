use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use eduextra::eduextra_auth::{ManualClock, Role};
use eduextra::eduextra_config::JwtConfig;
use eduextra::eduextra_core::{BcryptVerifier, CredentialVerifier};
use eduextra::modules::users::directory::{InMemoryUserDirectory, UserDirectory};
use eduextra::modules::users::model::{NewUser, User};
use eduextra::router::init_router;
use eduextra::state::AppState;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret-key-at-least-32-bytes";
pub const START: i64 = 1_700_000_000;
pub const ACCESS_TTL: i64 = 900;
pub const REFRESH_TTL: i64 = 604800;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub users: Arc<InMemoryUserDirectory>,
    pub clock: Arc<ManualClock>,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        access_token_expiry: ACCESS_TTL,
        refresh_token_expiry: REFRESH_TTL,
    }
}

fn test_verifier() -> BcryptVerifier {
    BcryptVerifier::with_cost(4)
}

/// Router over an in-memory directory and a clock frozen at [`START`].
pub fn setup_test_app() -> TestApp {
    let users = Arc::new(InMemoryUserDirectory::new());
    let clock = Arc::new(ManualClock::at_timestamp(START));
    let state = AppState::new(
        test_jwt_config(),
        users.clone(),
        Arc::new(test_verifier()),
        clock.clone(),
    )
    .unwrap();

    TestApp {
        router: init_router(state.clone()),
        state,
        users,
        clock,
    }
}

/// Inserts a user directly into the directory.
#[allow(dead_code)]
pub async fn create_test_user(app: &TestApp, email: &str, password: &str, role: Role) -> User {
    app.users
        .insert(NewUser {
            full_name: "Test User".to_string(),
            email: email.to_string(),
            role,
            password_hash: test_verifier().hash(password).unwrap(),
        })
        .await
        .unwrap()
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[allow(dead_code)]
pub fn bearer_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

/// Sends a request and returns the status with the JSON body (`Null` when empty).
pub async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

/// Logs in through the API and returns the response body.
#[allow(dead_code)]
pub async fn login(app: &TestApp, email: &str, password: &str) -> Value {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/auth/login",
            serde_json::json!({ "email": email, "password": password }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body
}
