use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::models::{ActionResult, AddStudentRequest, CreateTestRequest};
use crate::services::AppState;

/// First human-readable message out of a validator error set.
fn validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .filter_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| "Invalid request".to_string())
}

pub async fn list_tests(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let catalog = state.catalog.lock().await;
    Json(json!({
        "tests": catalog.list_tests(),
        "categories": catalog.list_categories(),
    }))
}

pub async fn create_test(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTestRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "result": ActionResult::rejected(validation_message(&e)),
                "test": serde_json::Value::Null,
            })),
        );
    }

    let mut catalog = state.catalog.lock().await;
    let (result, summary) = catalog.add_test(
        &req.name,
        &req.description,
        req.duration_minutes,
        req.category.clone(),
    );

    let status = if result.success {
        StatusCode::CREATED
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(json!({ "result": result, "test": summary })))
}

pub async fn delete_test(
    State(state): State<Arc<AppState>>,
    Path(test_id): Path<String>,
) -> impl IntoResponse {
    let mut catalog = state.catalog.lock().await;
    let result = catalog.delete_test(&test_id);
    let status = if result.success {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    (status, Json(result))
}

pub async fn list_students(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let accounts = state.accounts.lock().await;
    Json(json!({ "students": accounts.list_students() }))
}

pub async fn add_student(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddStudentRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ActionResult::rejected(validation_message(&e))),
        );
    }

    let mut accounts = state.accounts.lock().await;
    let result = accounts.add_student(&req.email, &req.password);
    let status = if result.success {
        StatusCode::CREATED
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(result))
}

pub async fn delete_student(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> impl IntoResponse {
    let mut accounts = state.accounts.lock().await;
    let result = accounts.delete_student(&email);
    let status = if result.success {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    (status, Json(result))
}
