use axum::http::StatusCode;
use serde_json::json;

mod common;

use common::{ADMIN_EMAIL, ADMIN_PASSWORD, SEEDED_TEST_ID};

#[tokio::test]
async fn catalog_lists_seeded_test_and_categories() {
    let app = common::create_test_app();
    let token = common::login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let (status, body) = common::get(&app, "/admin/tests", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let tests = body["tests"].as_array().unwrap();
    assert_eq!(tests.len(), 1);
    assert_eq!(tests[0]["id"], SEEDED_TEST_ID);
    assert_eq!(tests[0]["question_count"], 4);
    assert_eq!(body["categories"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn create_test_stores_duration_in_seconds() {
    let app = common::create_test_app();
    let token = common::login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let (status, body) = common::post_json(
        &app,
        "/admin/tests",
        Some(&token),
        json!({ "name": "Blue Mock 1", "description": "", "duration_minutes": 45, "category": "blue" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["result"]["success"], true);
    assert_eq!(body["test"]["duration_seconds"], 2700);
    assert_eq!(body["test"]["description"], "No description");

    let (_, body) = common::get(&app, "/admin/tests", Some(&token)).await;
    assert_eq!(body["tests"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn create_test_validation_failures_come_back_as_results() {
    let app = common::create_test_app();
    let token = common::login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let (status, body) = common::post_json(
        &app,
        "/admin/tests",
        Some(&token),
        json!({ "name": "", "duration_minutes": 30 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["result"]["success"], false);
    assert_eq!(body["result"]["message"], "Please enter test name");

    let (status, body) = common::post_json(
        &app,
        "/admin/tests",
        Some(&token),
        json!({ "name": "Grey Mock 1", "duration_minutes": 0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["result"]["success"], false);
    assert_eq!(body["result"]["message"], "Please enter a valid duration");
}

#[tokio::test]
async fn delete_test_then_404_on_repeat() {
    let app = common::create_test_app();
    let token = common::login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let uri = format!("/admin/tests/{}", SEEDED_TEST_ID);
    let (status, body) = common::delete(&app, &uri, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = common::delete(&app, &uri, Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn student_roster_add_duplicate_and_delete() {
    let app = common::create_test_app();
    let token = common::login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let (_, body) = common::get(&app, "/admin/students", Some(&token)).await;
    assert_eq!(body["students"].as_array().unwrap().len(), 1);

    let (status, body) = common::post_json(
        &app,
        "/admin/students",
        Some(&token),
        json!({ "email": "New@Student.com", "password": "secret1" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);

    // the new student can log in with the normalized email
    common::login(&app, "new@student.com", "secret1").await;

    let (status, body) = common::post_json(
        &app,
        "/admin/students",
        Some(&token),
        json!({ "email": "new@student.com", "password": "other" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "This email already exists");

    let (status, _) =
        common::delete(&app, "/admin/students/new@student.com", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = common::get(&app, "/admin/students", Some(&token)).await;
    assert_eq!(body["students"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn add_student_rejects_blank_fields() {
    let app = common::create_test_app();
    let token = common::login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let (status, body) = common::post_json(
        &app,
        "/admin/students",
        Some(&token),
        json!({ "email": "", "password": "pw" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Please enter both email and password");
}
