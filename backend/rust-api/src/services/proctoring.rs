use chrono::Local;

use crate::metrics::VIOLATIONS_TOTAL;
use crate::models::{ExamPhase, ProctorSignal, Session, Violation};

/// Fold one environment signal into the session. Signals outside an active
/// attempt are ignored; no signal can fail or corrupt the session, the worst
/// case of a dropped or duplicated signal is an inaccurate counter.
pub fn ingest_signal(session: &mut Session, signal: ProctorSignal) {
    if session.phase != ExamPhase::InProgress {
        tracing::debug!("Ignoring proctor signal outside active attempt: {:?}", signal);
        return;
    }

    match signal {
        ProctorSignal::VisibilityLost => {
            session.tab_switch_count += 1;
            record_violation(session, "Tab switched");
            VIOLATIONS_TOTAL.with_label_values(&["tab_switch"]).inc();
        }
        ProctorSignal::FullscreenLost => {
            session.fullscreen_exit_count += 1;
            session.is_fullscreen = false;
            record_violation(session, "Exited fullscreen");
            VIOLATIONS_TOTAL
                .with_label_values(&["fullscreen_exit"])
                .inc();
        }
        ProctorSignal::ScreenshotAttempt => {
            session.screenshot_blocked = true;
            record_violation(session, "Screenshot detected");
            VIOLATIONS_TOTAL.with_label_values(&["screenshot"]).inc();
        }
        ProctorSignal::FullscreenRestored => {
            // Clears the interstitial; counters are deliberately kept
            session.is_fullscreen = true;
            session.screenshot_blocked = false;
        }
    }
}

fn record_violation(session: &mut Session, message: &str) {
    let violation = Violation {
        recorded_at: Local::now(),
        message: message.to_string(),
    };
    tracing::warn!(
        "Proctoring violation recorded: {} (tab_switches={}, fullscreen_exits={})",
        violation.message,
        session.tab_switch_count,
        session.fullscreen_exit_count
    );
    session.violations.push(violation);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_session() -> Session {
        let mut session = Session::new();
        session.phase = ExamPhase::InProgress;
        session
    }

    #[test]
    fn tab_switches_and_fullscreen_exits_accumulate_in_order() {
        let mut session = active_session();

        ingest_signal(&mut session, ProctorSignal::VisibilityLost);
        ingest_signal(&mut session, ProctorSignal::VisibilityLost);
        ingest_signal(&mut session, ProctorSignal::VisibilityLost);
        ingest_signal(&mut session, ProctorSignal::FullscreenLost);

        assert_eq!(session.tab_switch_count, 3);
        assert_eq!(session.fullscreen_exit_count, 1);
        assert_eq!(session.violations.len(), 4);
        assert_eq!(session.violations[0].message, "Tab switched");
        assert_eq!(session.violations[3].message, "Exited fullscreen");
        assert!(session
            .violations
            .windows(2)
            .all(|w| w[0].recorded_at <= w[1].recorded_at));
        assert!(!session.is_fullscreen);
    }

    #[test]
    fn screenshot_blocks_until_fullscreen_restored() {
        let mut session = active_session();

        ingest_signal(&mut session, ProctorSignal::ScreenshotAttempt);
        assert!(session.screenshot_blocked);
        assert_eq!(session.violations.len(), 1);

        ingest_signal(&mut session, ProctorSignal::FullscreenRestored);
        assert!(!session.screenshot_blocked);
        assert!(session.is_fullscreen);
        // the log and counters survive the unblock
        assert_eq!(session.violations.len(), 1);
    }

    #[test]
    fn signals_outside_active_attempt_are_ignored() {
        let mut session = Session::new();

        ingest_signal(&mut session, ProctorSignal::VisibilityLost);
        ingest_signal(&mut session, ProctorSignal::ScreenshotAttempt);

        assert_eq!(session.tab_switch_count, 0);
        assert!(session.violations.is_empty());
        assert!(!session.screenshot_blocked);
    }
}
