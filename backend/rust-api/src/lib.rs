use axum::{
    http::{header, Method},
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod handlers;
pub mod metrics;
pub mod middlewares;
pub mod models;
pub mod services;

pub use config::Config;
pub use services::AppState;

pub fn create_router(app_state: std::sync::Arc<services::AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_origin(tower_http::cors::Any); // TODO: restrict to specific origins in production

    Router::new()
        // Public endpoints (no auth required)
        .route("/health", get(handlers::health_check))
        // Metrics endpoint with Basic Auth protection
        .route(
            "/metrics",
            get(handlers::metrics_handler)
                .layer(middleware::from_fn(handlers::metrics_auth_middleware)),
        )
        .route("/api/v1/auth/login", post(handlers::auth::login))
        // Candidate endpoints (require JWT)
        .nest(
            "/api/v1/exam",
            exam_routes().layer(middleware::from_fn_with_state(
                app_state.clone(),
                middlewares::auth::auth_middleware,
            )),
        )
        // Admin endpoints (require JWT + admin role)
        .nest(
            "/admin",
            admin_routes().layer(middleware::from_fn_with_state(
                app_state.clone(),
                middlewares::auth::auth_middleware,
            )),
        )
        .with_state(app_state)
        .layer(middleware::from_fn(
            middlewares::metrics::metrics_middleware,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn exam_routes() -> Router<std::sync::Arc<services::AppState>> {
    Router::new()
        .route("/", get(handlers::exam::get_overview))
        .route("/tests", get(handlers::exam::list_tests))
        .route("/select", post(handlers::exam::select_test))
        .route("/start", post(handlers::exam::start_test))
        .route("/answer", post(handlers::exam::answer))
        .route("/clear", post(handlers::exam::clear_response))
        .route("/next", post(handlers::exam::save_and_next))
        .route("/mark", post(handlers::exam::mark_and_next))
        .route("/navigate", post(handlers::exam::navigate))
        .route("/submit", post(handlers::exam::request_submit))
        .route("/confirm", post(handlers::exam::confirm_submit))
        .route("/restart", post(handlers::exam::restart_test))
        .route("/status", get(handlers::exam::get_status_counts))
        .route("/score", get(handlers::exam::get_score))
        .route("/violations", get(handlers::exam::get_violations))
        .route("/proctor", post(handlers::exam::proctor_signal))
        .route("/stream", get(handlers::sse::exam_stream))
}

fn admin_routes() -> Router<std::sync::Arc<services::AppState>> {
    Router::new()
        .route(
            "/tests",
            get(handlers::admin::list_tests).post(handlers::admin::create_test),
        )
        .route("/tests/{id}", delete(handlers::admin::delete_test))
        .route(
            "/students",
            get(handlers::admin::list_students).post(handlers::admin::add_student),
        )
        .route("/students/{email}", delete(handlers::admin::delete_student))
        .route_layer(middleware::from_fn(
            middlewares::auth::admin_guard_middleware,
        ))
}
