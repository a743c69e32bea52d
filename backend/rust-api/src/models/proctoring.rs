use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Abstract environment signal. Any host (browser shell, desktop wrapper,
/// test harness) reports integrity events through this one enum; the engine
/// never talks to a concrete visibility/fullscreen API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProctorSignal {
    VisibilityLost,
    FullscreenLost,
    ScreenshotAttempt,
    FullscreenRestored,
}

#[derive(Debug, Deserialize)]
pub struct ProctorSignalRequest {
    pub signal: ProctorSignal,
}

/// One recorded integrity breach. Timestamped with wall-clock local time at
/// append time; the log is append-only for the lifetime of the attempt.
#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    pub recorded_at: DateTime<Local>,
    pub message: String,
}
