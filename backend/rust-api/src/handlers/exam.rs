use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::models::{
    AnswerRequest, ConfirmSubmitRequest, ConfirmSubmitResponse, NavigateRequest,
    ProctorSignalRequest, SelectTestRequest,
};
use crate::services::exam_engine::ExamError;
use crate::services::AppState;

fn error_response(e: ExamError) -> (StatusCode, String) {
    let status = match e {
        ExamError::NoTestSelected
        | ExamError::EmptyTest
        | ExamError::OptionOutOfRange(_)
        | ExamError::IndexOutOfRange { .. } => StatusCode::BAD_REQUEST,
        ExamError::UnknownQuestion(_) => StatusCode::NOT_FOUND,
        ExamError::NotInProgress
        | ExamError::SubmissionPending
        | ExamError::NoPendingSubmission
        | ExamError::TokenMismatch
        | ExamError::NotCompleted => StatusCode::CONFLICT,
        ExamError::ShuffleFault => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, e.to_string())
}

/// Catalog listing for the test-selection screen.
pub async fn list_tests(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let catalog = state.catalog.lock().await;
    Json(json!({
        "tests": catalog.list_tests(),
        "categories": catalog.list_categories(),
    }))
}

pub async fn get_overview(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let engine = state.engine.lock().await;
    Json(engine.overview())
}

pub async fn select_test(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectTestRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let test = {
        let catalog = state.catalog.lock().await;
        catalog
            .find_test(&req.test_id)
            .cloned()
            .ok_or((StatusCode::NOT_FOUND, "Test not found".to_string()))?
    };

    tracing::info!("Test selected: {}", test.id);
    let mut engine = state.engine.lock().await;
    engine.select_test(test);
    Ok(Json(engine.overview()))
}

pub async fn start_test(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let mut engine = state.engine.lock().await;
    engine
        .start_test(&mut rand::rng())
        .map_err(error_response)?;
    Ok(Json(engine.overview()))
}

pub async fn answer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnswerRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let mut engine = state.engine.lock().await;
    engine
        .answer(req.question_id, req.option_index)
        .map_err(error_response)?;
    Ok(Json(engine.overview()))
}

pub async fn clear_response(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let mut engine = state.engine.lock().await;
    engine.clear_response().map_err(error_response)?;
    Ok(Json(engine.overview()))
}

pub async fn save_and_next(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let mut engine = state.engine.lock().await;
    engine.save_and_next().map_err(error_response)?;
    Ok(Json(engine.overview()))
}

pub async fn mark_and_next(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let mut engine = state.engine.lock().await;
    engine.mark_and_next().map_err(error_response)?;
    Ok(Json(engine.overview()))
}

pub async fn navigate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NavigateRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let mut engine = state.engine.lock().await;
    engine.navigate_to(req.index).map_err(error_response)?;
    Ok(Json(engine.overview()))
}

/// First half of the submit protocol: returns the confirmation prompt the
/// host must show the candidate.
pub async fn request_submit(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let mut engine = state.engine.lock().await;
    let prompt = engine.request_submit().map_err(error_response)?;
    Ok(Json(prompt))
}

pub async fn confirm_submit(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ConfirmSubmitRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let mut engine = state.engine.lock().await;
    let completed = engine
        .confirm_submit(req.token, req.accepted)
        .map_err(error_response)?;
    Ok(Json(ConfirmSubmitResponse { completed }))
}

pub async fn restart_test(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut engine = state.engine.lock().await;
    engine.restart_test();
    Json(engine.overview())
}

pub async fn get_status_counts(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let engine = state.engine.lock().await;
    Json(engine.status_counts())
}

pub async fn get_score(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let engine = state.engine.lock().await;
    let score = engine.score().map_err(error_response)?;
    Ok(Json(score))
}

pub async fn get_violations(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let engine = state.engine.lock().await;
    Json(json!({
        "violations": engine.violations(),
        "tab_switch_count": engine.session().tab_switch_count,
        "fullscreen_exit_count": engine.session().fullscreen_exit_count,
    }))
}

/// Proctor signal ingest. Any host environment reports integrity events
/// here; the engine folds each one in atomically. This endpoint never fails
/// the session, signals in the wrong phase are simply dropped.
pub async fn proctor_signal(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProctorSignalRequest>,
) -> impl IntoResponse {
    let mut engine = state.engine.lock().await;
    engine.proctor_signal(req.signal);
    Json(engine.overview())
}
