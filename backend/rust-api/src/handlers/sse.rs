use axum::{
    extract::State,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
};
use chrono::Utc;
use futures::stream::{self, Stream};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use crate::metrics::SSE_CONNECTIONS_ACTIVE;
use crate::models::timer::{TimeExpired, TimerEvent, TimerTick};
use crate::models::ExamPhase;
use crate::services::AppState;

struct ConnectionGuard;

impl ConnectionGuard {
    fn new() -> Self {
        SSE_CONNECTIONS_ACTIVE.inc();
        Self
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        SSE_CONNECTIONS_ACTIVE.dec();
    }
}

/// SSE mirror of the engine clock for the exam page. The stream only reads
/// session state; the countdown itself is driven by the binary's tick task.
/// GET /api/v1/exam/stream
pub async fn exam_stream(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    tracing::info!("Client connected to exam SSE stream");
    let stream = create_timer_stream(state);
    Sse::new(stream).keep_alive(KeepAlive::default())
}

fn tick_interval_ms() -> u64 {
    std::env::var("SSE_TICK_INTERVAL_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(1000)
}

fn create_timer_stream(
    state: Arc<AppState>,
) -> impl Stream<Item = Result<Event, Infallible>> {
    let interval = tick_interval_ms();
    let guard = ConnectionGuard::new();

    stream::unfold(
        (state, guard, false),
        move |(state, guard, expired_sent)| async move {
            if expired_sent {
                return None;
            }

            let (phase, remaining, total) = {
                let engine = state.engine.lock().await;
                let session = engine.session();
                let total = session
                    .selected_test
                    .as_ref()
                    .map(|t| t.duration_seconds)
                    .unwrap_or(0);
                (engine.phase(), session.time_left_seconds, total)
            };

            let event = match phase {
                ExamPhase::InProgress => {
                    let tick = TimerEvent::TimerTick(TimerTick {
                        remaining_seconds: remaining,
                        total_seconds: total,
                        timestamp: Utc::now(),
                    });
                    Event::default()
                        .event(tick.event_name())
                        .data(tick.to_sse_data())
                }
                ExamPhase::Completed => {
                    let expired = TimerEvent::TimeExpired(TimeExpired {
                        timestamp: Utc::now(),
                        message: "Attempt completed".to_string(),
                    });
                    let event = Event::default()
                        .event(expired.event_name())
                        .data(expired.to_sse_data());
                    return Some((Ok(event), (state, guard, true)));
                }
                // No attempt to follow
                ExamPhase::Idle | ExamPhase::Selected => return None,
            };

            sleep(Duration::from_millis(interval)).await;
            Some((Ok(event), (state, guard, false)))
        },
    )
}
