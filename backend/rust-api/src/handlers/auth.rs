use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

use crate::middlewares::auth::{JwtClaims, JwtService};
use crate::models::{LoginRequest, LoginResponse};
use crate::services::AppState;

fn access_token_ttl_seconds() -> i64 {
    std::env::var("JWT_ACCESS_TOKEN_TTL_SECONDS")
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(3600)
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if let Err(e) = req.validate() {
        return Err((StatusCode::BAD_REQUEST, e.to_string()));
    }

    let accounts = state.accounts.lock().await;
    let profile = accounts
        .authenticate(&req.email, &req.password)
        .ok_or_else(|| {
            tracing::warn!("Login rejected for {}", req.email);
            (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password".to_string(),
            )
        })?;

    let jwt_service = JwtService::new(&state.config.jwt_secret);
    let claims = JwtClaims::for_account(&profile.email, profile.role, access_token_ttl_seconds());
    let access_token = jwt_service.generate_token(claims).map_err(|e| {
        tracing::error!("Failed to issue token: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to issue token".to_string(),
        )
    })?;

    tracing::info!("Login successful: {}", profile.email);

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            access_token,
            user: profile,
        }),
    ))
}
