use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::catalog::{Test, TestSummary};
use super::proctoring::Violation;
use super::question::ShuffledQuestion;

/// Lifecycle of the single active attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamPhase {
    Idle,
    Selected,
    InProgress,
    Completed,
}

/// The mutable session aggregate. Exclusively owned by the exam engine; the
/// proctoring monitor and the timer only emit events into it.
#[derive(Debug, Clone)]
pub struct Session {
    pub phase: ExamPhase,
    pub selected_test: Option<Test>,
    pub questions: Vec<ShuffledQuestion>,
    pub current_index: usize,
    /// question id -> selected option index in the shuffled order
    pub answers: HashMap<u32, usize>,
    /// question ids flagged for review; independent of answering
    pub marked_for_review: HashSet<u32>,
    /// question indexes the candidate has seen; never shrinks within an attempt
    pub visited: BTreeSet<usize>,
    pub time_left_seconds: u32,
    pub violations: Vec<Violation>,
    pub tab_switch_count: u32,
    pub fullscreen_exit_count: u32,
    pub is_fullscreen: bool,
    pub screenshot_blocked: bool,
    /// token of an unresolved submit confirmation, if any
    pub pending_submit: Option<Uuid>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: ExamPhase::Idle,
            selected_test: None,
            questions: Vec::new(),
            current_index: 0,
            answers: HashMap::new(),
            marked_for_review: HashSet::new(),
            visited: BTreeSet::from([0]),
            time_left_seconds: 0,
            violations: Vec::new(),
            tab_switch_count: 0,
            fullscreen_exit_count: 0,
            is_fullscreen: false,
            screenshot_blocked: false,
            pending_submit: None,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Five-way palette classification. The counts always sum to the number of
/// questions in the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub answered: usize,
    pub visited_not_answered: usize,
    pub not_visited: usize,
    pub marked_for_review: usize,
    pub answered_marked: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.answered
            + self.visited_not_answered
            + self.not_visited
            + self.marked_for_review
            + self.answered_marked
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub correct: usize,
    pub incorrect: usize,
    pub unattempted: usize,
    pub total_marks: i64,
    pub max_marks: usize,
}

/// Pending submit confirmation handed back by `request_submit`. The prompt
/// message states the exact unanswered count when it is non-zero.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitPrompt {
    pub token: Uuid,
    pub message: String,
    pub unanswered: usize,
}

#[derive(Debug, Deserialize)]
pub struct SelectTestRequest {
    pub test_id: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub question_id: u32,
    pub option_index: usize,
}

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub index: usize,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmSubmitRequest {
    pub token: Uuid,
    pub accepted: bool,
}

#[derive(Debug, Serialize)]
pub struct ConfirmSubmitResponse {
    pub completed: bool,
}

/// Candidate-facing view of the current question. The correct index is
/// deliberately absent.
#[derive(Debug, Serialize)]
pub struct QuestionView {
    pub index: usize,
    pub id: u32,
    pub prompt: String,
    pub image: Option<String>,
    pub options: Vec<String>,
    pub selected_option: Option<usize>,
    pub marked_for_review: bool,
}

impl QuestionView {
    pub fn from_session(session: &Session, index: usize, question: &ShuffledQuestion) -> Self {
        Self {
            index,
            id: question.id,
            prompt: question.prompt.clone(),
            image: question.image.clone(),
            options: question.options.iter().map(|o| o.text.clone()).collect(),
            selected_option: session.answers.get(&question.id).copied(),
            marked_for_review: session.marked_for_review.contains(&question.id),
        }
    }
}

/// Read-only projection of the whole session for the exam page.
#[derive(Debug, Serialize)]
pub struct SessionOverview {
    pub phase: ExamPhase,
    pub selected_test: Option<TestSummary>,
    pub question_count: usize,
    pub current_question: Option<QuestionView>,
    pub status_counts: Option<StatusCounts>,
    pub time_left_seconds: u32,
    pub tab_switch_count: u32,
    pub fullscreen_exit_count: u32,
    pub is_fullscreen: bool,
    pub screenshot_blocked: bool,
    pub submit_pending: bool,
}
