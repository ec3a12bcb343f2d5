mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{
    bearer_request, create_test_user, generate_unique_email, json_request, login, send,
    setup_test_app,
};
use eduextra::eduextra_auth::Role;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_get_profile() {
    let app = setup_test_app();
    let email = generate_unique_email();
    let user = create_test_user(&app, &email, "testpass123", Role::Coordinator).await;
    let tokens = login(&app, &email, "testpass123").await;

    let (status, body) = send(
        &app,
        bearer_request(
            "GET",
            "/api/users/profile",
            tokens["access_token"].as_str().unwrap(),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], user.id.to_string());
    assert_eq!(body["email"], email);
    assert_eq!(body["role"], "COORDINATOR");
    assert_eq!(body["is_active"], true);
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_get_profile_without_token() {
    let app = setup_test_app();
    let request = Request::builder()
        .method("GET")
        .uri("/api/users/profile")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing authorization token");
}

#[tokio::test]
async fn test_get_profile_with_wrong_scheme() {
    let app = setup_test_app();
    let email = generate_unique_email();
    create_test_user(&app, &email, "testpass123", Role::Student).await;
    let tokens = login(&app, &email, "testpass123").await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/users/profile")
        .header(
            header::AUTHORIZATION,
            format!("Token {}", tokens["access_token"].as_str().unwrap()),
        )
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_token_cannot_be_used_as_bearer() {
    let app = setup_test_app();
    let email = generate_unique_email();
    create_test_user(&app, &email, "testpass123", Role::Student).await;
    let tokens = login(&app, &email, "testpass123").await;

    let (status, body) = send(
        &app,
        bearer_request(
            "GET",
            "/api/users/profile",
            tokens["refresh_token"].as_str().unwrap(),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_admin_can_disable_and_enable_user() {
    let app = setup_test_app();
    let admin_email = generate_unique_email();
    create_test_user(&app, &admin_email, "adminpass", Role::Admin).await;
    let admin = login(&app, &admin_email, "adminpass").await;
    let admin_token = admin["access_token"].as_str().unwrap();

    let student_email = generate_unique_email();
    let student = create_test_user(&app, &student_email, "testpass123", Role::Student).await;

    let (status, body) = send(
        &app,
        bearer_request(
            "PATCH",
            &format!("/api/users/{}/disable", student.id),
            admin_token,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_active"], false);

    let (login_status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": student_email, "password": "testpass123" }),
        ),
    )
    .await;
    assert_eq!(login_status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        bearer_request(
            "PATCH",
            &format!("/api/users/{}/enable", student.id),
            admin_token,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_active"], true);

    login(&app, &student_email, "testpass123").await;
}

#[tokio::test]
async fn test_non_admin_cannot_disable_user() {
    let app = setup_test_app();
    let target = create_test_user(&app, &generate_unique_email(), "testpass123", Role::Student).await;

    for role in [Role::Coordinator, Role::Teacher, Role::Monitor, Role::Student] {
        let email = generate_unique_email();
        create_test_user(&app, &email, "testpass123", role).await;
        let tokens = login(&app, &email, "testpass123").await;

        let (status, body) = send(
            &app,
            bearer_request(
                "PATCH",
                &format!("/api/users/{}/disable", target.id),
                tokens["access_token"].as_str().unwrap(),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN, "{role} should be forbidden");
        assert_eq!(body["error"], "Access denied");
    }

    let still_active = app.state.user_service.get_profile(&target.email).await.unwrap();
    assert!(still_active.is_active);
}

#[tokio::test]
async fn test_disable_without_token() {
    let app = setup_test_app();
    let request = Request::builder()
        .method("PATCH")
        .uri(format!("/api/users/{}/disable", Uuid::new_v4()))
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_disable_unknown_user() {
    let app = setup_test_app();
    let admin_email = generate_unique_email();
    create_test_user(&app, &admin_email, "adminpass", Role::Admin).await;
    let admin = login(&app, &admin_email, "adminpass").await;

    let (status, _) = send(
        &app,
        bearer_request(
            "PATCH",
            &format!("/api/users/{}/disable", Uuid::new_v4()),
            admin["access_token"].as_str().unwrap(),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_access_token_outlives_deactivation() {
    let app = setup_test_app();
    let email = generate_unique_email();
    let user = create_test_user(&app, &email, "testpass123", Role::Teacher).await;
    let tokens = login(&app, &email, "testpass123").await;

    app.state.user_service.disable_user(user.id).await.unwrap();

    let (status, body) = send(
        &app,
        bearer_request(
            "GET",
            "/api/users/profile",
            tokens["access_token"].as_str().unwrap(),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_active"], false);
}
