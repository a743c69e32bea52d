use std::collections::BTreeSet;
use std::panic::{catch_unwind, AssertUnwindSafe};

use chrono::Utc;
use rand::Rng;
use thiserror::Error;
use uuid::Uuid;

use crate::metrics::{SESSIONS_ACTIVE, SESSIONS_TOTAL};
use crate::models::timer::{TimeExpired, TimerEvent, TimerTick};
use crate::models::{
    ExamPhase, ProctorSignal, QuestionView, ScoreBreakdown, Session, SessionOverview,
    ShuffledQuestion, StatusCounts, SubmitPrompt, Test, TestSummary, Violation,
};

use super::{proctoring, scoring, shuffle, status};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExamError {
    #[error("No test selected")]
    NoTestSelected,
    #[error("Selected test has no questions")]
    EmptyTest,
    #[error("Failed to prepare questions")]
    ShuffleFault,
    #[error("No attempt in progress")]
    NotInProgress,
    #[error("A submission is awaiting confirmation")]
    SubmissionPending,
    #[error("No submission awaiting confirmation")]
    NoPendingSubmission,
    #[error("Confirmation token does not match")]
    TokenMismatch,
    #[error("Unknown question id {0}")]
    UnknownQuestion(u32),
    #[error("Option index {0} is out of range")]
    OptionOutOfRange(usize),
    #[error("Question index {index} is out of range ({count} questions)")]
    IndexOutOfRange { index: usize, count: usize },
    #[error("Results are available only after submission")]
    NotCompleted,
}

/// The session state machine. Owns the single `Session` aggregate; every
/// mutation goes through a method here and is applied atomically against the
/// current state (the caller serializes access with a mutex).
pub struct ExamEngine {
    session: Session,
}

impl ExamEngine {
    pub fn new() -> Self {
        Self {
            session: Session::new(),
        }
    }

    pub fn phase(&self) -> ExamPhase {
        self.session.phase
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Choose a test and preset the clock to its duration. Valid from any
    /// phase; any prior attempt state is discarded. The clock does not start
    /// until `start_test`.
    pub fn select_test(&mut self, test: Test) {
        if self.session.phase == ExamPhase::InProgress {
            SESSIONS_ACTIVE.dec();
        }
        let duration = test.duration_seconds;
        self.session = Session::new();
        self.session.selected_test = Some(test);
        self.session.time_left_seconds = duration;
        self.session.phase = ExamPhase::Selected;
    }

    /// Begin the attempt: shuffle every question and reset all transient
    /// state. On failure (pending prompt, no test, empty test, shuffle fault)
    /// the prior state is left untouched.
    pub fn start_test<R: Rng>(&mut self, rng: &mut R) -> Result<(), ExamError> {
        // An open submit prompt must be resolved before the attempt can be
        // thrown away and restarted.
        if self.session.pending_submit.is_some() {
            return Err(ExamError::SubmissionPending);
        }
        let test = self
            .session
            .selected_test
            .as_ref()
            .ok_or(ExamError::NoTestSelected)?;
        if test.questions.is_empty() {
            return Err(ExamError::EmptyTest);
        }

        // A fault inside shuffling must surface as a failure result, never
        // reach the caller as an unhandled panic.
        let shuffled = catch_unwind(AssertUnwindSafe(|| {
            test.questions
                .iter()
                .map(|q| shuffle::shuffle_question(q, rng))
                .collect::<Vec<ShuffledQuestion>>()
        }))
        .map_err(|_| {
            tracing::error!("Question shuffling panicked; start_test aborted");
            ExamError::ShuffleFault
        })?;

        if self.session.phase == ExamPhase::InProgress {
            SESSIONS_ACTIVE.dec();
            SESSIONS_TOTAL.with_label_values(&["abandoned"]).inc();
        }

        let duration = test.duration_seconds;
        self.session.questions = shuffled;
        self.session.current_index = 0;
        self.session.answers.clear();
        self.session.marked_for_review.clear();
        self.session.visited = BTreeSet::from([0]);
        self.session.time_left_seconds = duration;
        self.session.violations.clear();
        self.session.tab_switch_count = 0;
        self.session.fullscreen_exit_count = 0;
        self.session.screenshot_blocked = false;
        self.session.pending_submit = None;
        self.session.phase = ExamPhase::InProgress;

        SESSIONS_TOTAL.with_label_values(&["started"]).inc();
        SESSIONS_ACTIVE.inc();
        tracing::info!(
            "Attempt started: {} questions, {}s on the clock",
            self.session.questions.len(),
            duration
        );
        Ok(())
    }

    /// Upsert the answer for a question. Does not advance the cursor.
    pub fn answer(&mut self, question_id: u32, option_index: usize) -> Result<(), ExamError> {
        self.require_in_progress()?;
        let question = self
            .session
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .ok_or(ExamError::UnknownQuestion(question_id))?;
        if option_index >= question.options.len() {
            return Err(ExamError::OptionOutOfRange(option_index));
        }
        self.session.answers.insert(question_id, option_index);
        Ok(())
    }

    /// Remove the answer for the current question only. Idempotent.
    pub fn clear_response(&mut self) -> Result<(), ExamError> {
        self.require_in_progress()?;
        let current_id = self.session.questions[self.session.current_index].id;
        self.session.answers.remove(&current_id);
        Ok(())
    }

    /// Advance to the next question; no-op on the last one.
    pub fn save_and_next(&mut self) -> Result<(), ExamError> {
        self.require_in_progress()?;
        self.advance();
        Ok(())
    }

    /// Flag the current question for review, then advance like
    /// `save_and_next`. The flag persists even if the question is later
    /// answered or cleared.
    pub fn mark_and_next(&mut self) -> Result<(), ExamError> {
        self.require_in_progress()?;
        let current_id = self.session.questions[self.session.current_index].id;
        self.session.marked_for_review.insert(current_id);
        self.advance();
        Ok(())
    }

    /// Jump straight to a question, as from the palette.
    pub fn navigate_to(&mut self, index: usize) -> Result<(), ExamError> {
        self.require_in_progress()?;
        let count = self.session.questions.len();
        if index >= count {
            return Err(ExamError::IndexOutOfRange { index, count });
        }
        self.session.current_index = index;
        self.session.visited.insert(index);
        Ok(())
    }

    /// First half of the submit protocol: hand back a confirmation prompt.
    /// Every other mutating command is rejected until the prompt is resolved.
    pub fn request_submit(&mut self) -> Result<SubmitPrompt, ExamError> {
        self.require_in_progress()?;
        let unanswered = self.session.questions.len() - self.session.answers.len();
        let message = if unanswered > 0 {
            format!(
                "You have {} unanswered question(s). Are you sure you want to submit?",
                unanswered
            )
        } else {
            "Are you sure you want to submit the test?".to_string()
        };
        let token = Uuid::new_v4();
        self.session.pending_submit = Some(token);
        Ok(SubmitPrompt {
            token,
            message,
            unanswered,
        })
    }

    /// Second half of the submit protocol. Declining leaves the attempt
    /// exactly as it was; accepting completes it. A confirmation arriving
    /// after the attempt already completed (e.g. the clock ran out first) is
    /// a no-op reporting completion.
    pub fn confirm_submit(&mut self, token: Uuid, accepted: bool) -> Result<bool, ExamError> {
        if self.session.phase == ExamPhase::Completed {
            return Ok(true);
        }
        self.require_in_progress_ignoring_prompt()?;
        let pending = self
            .session
            .pending_submit
            .ok_or(ExamError::NoPendingSubmission)?;
        if pending != token {
            return Err(ExamError::TokenMismatch);
        }
        self.session.pending_submit = None;
        if accepted {
            self.complete("manual");
            return Ok(true);
        }
        Ok(false)
    }

    /// One-second countdown tick from the external tick source. At zero the
    /// attempt is force-submitted, bypassing any pending confirmation.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if self.session.phase != ExamPhase::InProgress {
            return None;
        }
        self.session.time_left_seconds = self.session.time_left_seconds.saturating_sub(1);
        if self.session.time_left_seconds == 0 {
            self.session.pending_submit = None;
            self.complete("forced");
            return Some(TimerEvent::TimeExpired(TimeExpired {
                timestamp: Utc::now(),
                message: "Time limit exceeded".to_string(),
            }));
        }
        Some(TimerEvent::TimerTick(TimerTick {
            remaining_seconds: self.session.time_left_seconds,
            total_seconds: self.total_seconds(),
            timestamp: Utc::now(),
        }))
    }

    /// Fold one proctoring signal into the session.
    pub fn proctor_signal(&mut self, signal: ProctorSignal) {
        proctoring::ingest_signal(&mut self.session, signal);
    }

    /// Unconditional reset to `Idle`: drops the selected test, the attempt
    /// state and any pending confirmation.
    pub fn restart_test(&mut self) {
        if self.session.phase == ExamPhase::InProgress {
            SESSIONS_ACTIVE.dec();
            SESSIONS_TOTAL.with_label_values(&["abandoned"]).inc();
        }
        self.session = Session::new();
        tracing::info!("Session reset to idle");
    }

    pub fn current_question(&self) -> Option<QuestionView> {
        if self.session.phase != ExamPhase::InProgress {
            return None;
        }
        let index = self.session.current_index;
        self.session
            .questions
            .get(index)
            .map(|q| QuestionView::from_session(&self.session, index, q))
    }

    pub fn status_counts(&self) -> StatusCounts {
        status::status_counts(
            &self.session.questions,
            &self.session.answers,
            &self.session.marked_for_review,
            &self.session.visited,
        )
    }

    /// Score breakdown; only visible once the attempt is completed.
    pub fn score(&self) -> Result<ScoreBreakdown, ExamError> {
        if self.session.phase != ExamPhase::Completed {
            return Err(ExamError::NotCompleted);
        }
        Ok(scoring::calculate_score(
            &self.session.questions,
            &self.session.answers,
        ))
    }

    pub fn violations(&self) -> &[Violation] {
        &self.session.violations
    }

    pub fn overview(&self) -> SessionOverview {
        let started = self.session.phase == ExamPhase::InProgress
            || self.session.phase == ExamPhase::Completed;
        SessionOverview {
            phase: self.session.phase,
            selected_test: self.session.selected_test.as_ref().map(TestSummary::from),
            question_count: self.session.questions.len(),
            current_question: self.current_question(),
            status_counts: started.then(|| self.status_counts()),
            time_left_seconds: self.session.time_left_seconds,
            tab_switch_count: self.session.tab_switch_count,
            fullscreen_exit_count: self.session.fullscreen_exit_count,
            is_fullscreen: self.session.is_fullscreen,
            screenshot_blocked: self.session.screenshot_blocked,
            submit_pending: self.session.pending_submit.is_some(),
        }
    }

    fn total_seconds(&self) -> u32 {
        self.session
            .selected_test
            .as_ref()
            .map(|t| t.duration_seconds)
            .unwrap_or(0)
    }

    fn advance(&mut self) {
        if self.session.current_index + 1 < self.session.questions.len() {
            self.session.current_index += 1;
            self.session.visited.insert(self.session.current_index);
        }
    }

    fn complete(&mut self, mode: &str) {
        self.session.phase = ExamPhase::Completed;
        SESSIONS_TOTAL.with_label_values(&["completed"]).inc();
        SESSIONS_ACTIVE.dec();
        tracing::info!("Attempt completed ({})", mode);
    }

    fn require_in_progress(&self) -> Result<(), ExamError> {
        self.require_in_progress_ignoring_prompt()?;
        if self.session.pending_submit.is_some() {
            return Err(ExamError::SubmissionPending);
        }
        Ok(())
    }

    fn require_in_progress_ignoring_prompt(&self) -> Result<(), ExamError> {
        if self.session.phase != ExamPhase::InProgress {
            return Err(ExamError::NotInProgress);
        }
        Ok(())
    }
}

impl Default for ExamEngine {
    fn default() -> Self {
        Self::new()
    }
}
