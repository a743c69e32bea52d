use std::sync::Arc;
use std::time::Duration;

use mocktest_api::models::timer::TimerEvent;
use mocktest_api::{config::Config, create_router, services::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mocktest_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Mock Test Portal API");

    let config = Config::load().expect("Failed to load configuration");
    tracing::info!(
        "Configuration loaded for environment: {:?}",
        std::env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string())
    );

    let app_state =
        Arc::new(AppState::new(config.clone()).expect("Failed to initialize application state"));

    // The engine only reacts to ticks; this task is the external tick source.
    spawn_tick_source(app_state.clone());

    let app = create_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind server address");

    tracing::info!("Server listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}

fn spawn_tick_source(state: Arc<AppState>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            let mut engine = state.engine.lock().await;
            if let Some(TimerEvent::TimeExpired(_)) = engine.tick() {
                tracing::warn!("Time limit exceeded; attempt force-submitted");
            }
        }
    });
}
