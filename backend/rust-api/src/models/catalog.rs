use serde::{Deserialize, Serialize};
use validator::Validate;

use super::question::Question;

/// A mock test as served to candidates. `questions` must be non-empty before
/// a session may start against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Test {
    pub id: String,
    pub name: String,
    pub description: String,
    pub duration_seconds: u32,
    pub category: String,
    pub questions: Vec<Question>,
}

/// Summary sent to the test-selection screen; question bodies stay server-side.
#[derive(Debug, Serialize)]
pub struct TestSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub duration_seconds: u32,
    pub category: String,
    pub question_count: usize,
}

impl From<&Test> for TestSummary {
    fn from(test: &Test) -> Self {
        Self {
            id: test.id.clone(),
            name: test.name.clone(),
            description: test.description.clone(),
            duration_seconds: test.duration_seconds,
            category: test.category.clone(),
            question_count: test.questions.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCategory {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTestRequest {
    #[validate(length(min = 1, message = "Please enter test name"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 1, message = "Please enter a valid duration"))]
    pub duration_minutes: u32,
    #[serde(default)]
    pub category: Option<String>,
}

/// Outcome of a catalog/roster mutation. Validation failures are reported
/// here rather than raised as faults.
#[derive(Debug, Serialize)]
pub struct ActionResult {
    pub success: bool,
    pub message: String,
}

impl ActionResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
