use axum::http::StatusCode;
use serde_json::json;

mod common;

use common::{ADMIN_EMAIL, ADMIN_PASSWORD, STUDENT_EMAIL, STUDENT_PASSWORD};

#[tokio::test]
async fn login_issues_tokens_for_seeded_accounts() {
    let app = common::create_test_app();

    let (status, body) = common::post_json(
        &app,
        "/api/v1/auth/login",
        None,
        json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].as_str().unwrap().len() > 20);
    assert_eq!(body["user"]["role"], "admin");

    let (status, body) = common::post_json(
        &app,
        "/api/v1/auth/login",
        None,
        json!({ "email": STUDENT_EMAIL, "password": STUDENT_PASSWORD }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "student");
}

#[tokio::test]
async fn login_normalizes_email_case_and_whitespace() {
    let app = common::create_test_app();
    let spaced = format!("  {}  ", STUDENT_EMAIL.to_uppercase());
    let (status, _) = common::post_json(
        &app,
        "/api/v1/auth/login",
        None,
        json!({ "email": spaced, "password": STUDENT_PASSWORD }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn bad_credentials_are_rejected_uniformly() {
    let app = common::create_test_app();

    let (status, _) = common::post_json(
        &app,
        "/api/v1/auth/login",
        None,
        json!({ "email": STUDENT_EMAIL, "password": "wrong" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = common::post_json(
        &app,
        "/api/v1/auth/login",
        None,
        json!({ "email": "ghost@test.com", "password": STUDENT_PASSWORD }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = common::post_json(
        &app,
        "/api/v1/auth/login",
        None,
        json!({ "email": "", "password": "" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn garbage_bearer_tokens_are_rejected() {
    let app = common::create_test_app();
    let (status, _) = common::get(&app, "/api/v1/exam", Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn students_cannot_reach_admin_routes() {
    let app = common::create_test_app();
    let token = common::login(&app, STUDENT_EMAIL, STUDENT_PASSWORD).await;

    let (status, _) = common::get(&app, "/admin/tests", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = common::post_json(
        &app,
        "/admin/students",
        Some(&token),
        json!({ "email": "x@y.com", "password": "pw" }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn metrics_endpoint_requires_basic_auth() {
    let app = common::create_test_app();
    let (status, _) = common::get(&app, "/metrics", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_is_public() {
    let app = common::create_test_app();
    let (status, body) = common::get(&app, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "mocktest-api");
    assert_eq!(body["session_phase"], "idle");
}
