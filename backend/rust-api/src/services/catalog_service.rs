use uuid::Uuid;

use crate::models::{ActionResult, OptionLabel, Question, Test, TestCategory, TestSummary};

/// In-memory test catalog. Content authoring is an external concern; this
/// holds the seeded sample bank plus whatever an admin adds at runtime.
/// Process-lifetime only, by design.
pub struct CatalogService {
    tests: Vec<Test>,
    categories: Vec<TestCategory>,
    question_bank: Vec<Question>,
}

impl CatalogService {
    pub fn new(default_duration_seconds: u32) -> Self {
        let question_bank = sample_questions();
        let tests = vec![Test {
            id: "white-mock-test-1".to_string(),
            name: "White Mock Test 1".to_string(),
            description: "Mock test based on actual PYQ".to_string(),
            duration_seconds: default_duration_seconds,
            category: "white".to_string(),
            questions: question_bank.clone(),
        }];
        Self {
            tests,
            categories: categories(),
            question_bank,
        }
    }

    pub fn list_tests(&self) -> Vec<TestSummary> {
        self.tests.iter().map(TestSummary::from).collect()
    }

    pub fn list_categories(&self) -> &[TestCategory] {
        &self.categories
    }

    pub fn find_test(&self, test_id: &str) -> Option<&Test> {
        self.tests.iter().find(|t| t.id == test_id)
    }

    /// Add a test. Validation failures come back as a rejected result, never
    /// a fault. New tests reuse the seeded question bank.
    pub fn add_test(
        &mut self,
        name: &str,
        description: &str,
        duration_minutes: u32,
        category: Option<String>,
    ) -> (ActionResult, Option<TestSummary>) {
        let name = name.trim();
        if name.is_empty() {
            return (ActionResult::rejected("Please enter test name"), None);
        }
        if duration_minutes == 0 {
            return (ActionResult::rejected("Please enter a valid duration"), None);
        }

        let description = description.trim();
        let test = Test {
            id: format!("test-{}", Uuid::new_v4()),
            name: name.to_string(),
            description: if description.is_empty() {
                "No description".to_string()
            } else {
                description.to_string()
            },
            duration_seconds: duration_minutes * 60,
            category: category.unwrap_or_else(|| "white".to_string()),
            questions: self.question_bank.clone(),
        };
        let summary = TestSummary::from(&test);
        tracing::info!("Test added to catalog: {} ({})", test.name, test.id);
        self.tests.push(test);
        (
            ActionResult::ok(format!("Test \"{}\" added successfully!", summary.name)),
            Some(summary),
        )
    }

    pub fn delete_test(&mut self, test_id: &str) -> ActionResult {
        let before = self.tests.len();
        self.tests.retain(|t| t.id != test_id);
        if self.tests.len() == before {
            return ActionResult::rejected("Test not found");
        }
        tracing::info!("Test removed from catalog: {}", test_id);
        ActionResult::ok("Test deleted")
    }
}

fn categories() -> Vec<TestCategory> {
    let defs = [
        ("white", "White Mock Tests", "⚪", "Comprehensive mock tests"),
        ("blue", "Blue Mock Tests", "🔵", "Advanced practice tests"),
        ("grey", "Grey Mock Tests", "⚫", "Standard difficulty tests"),
        ("pyq", "PYQ (2005-2025)", "📚", "Previous Year Questions"),
        ("latest", "Latest Pattern", "🆕", "New test pattern"),
    ];
    defs.iter()
        .map(|(id, name, icon, description)| TestCategory {
            id: (*id).to_string(),
            name: (*name).to_string(),
            icon: (*icon).to_string(),
            description: (*description).to_string(),
        })
        .collect()
}

fn sample_questions() -> Vec<Question> {
    let defs: [(u32, &str, &str, &str, &str, OptionLabel); 4] = [
        (1, "a", "d", "b", "c", OptionLabel::B),
        (2, "a", "b", "d", "c", OptionLabel::C),
        (3, "d", "c", "a", "b", OptionLabel::A),
        (4, "d", "c", "a", "b", OptionLabel::A),
    ];
    defs.iter()
        .map(|(id, a, b, c, d, correct)| Question {
            id: *id,
            prompt: "Read the instructions carefully".to_string(),
            image: Some(format!("https://example.invalid/questions/{}.png", id)),
            option_a: (*a).to_string(),
            option_b: (*b).to_string(),
            option_c: (*c).to_string(),
            option_d: (*d).to_string(),
            correct_option: *correct,
        })
        .collect()
}
