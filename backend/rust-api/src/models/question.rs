use serde::{Deserialize, Serialize};

/// Label of an option as authored in the canonical question bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; 4] = [OptionLabel::A, OptionLabel::B, OptionLabel::C, OptionLabel::D];
}

/// Canonical question record, owned by the test catalog. Never mutated after
/// authoring time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub prompt: String,
    pub image: Option<String>,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_option: OptionLabel,
}

impl Question {
    /// Option texts in authored order A, B, C, D.
    pub fn options(&self) -> [(OptionLabel, &str); 4] {
        [
            (OptionLabel::A, self.option_a.as_str()),
            (OptionLabel::B, self.option_b.as_str()),
            (OptionLabel::C, self.option_c.as_str()),
            (OptionLabel::D, self.option_d.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShuffledOption {
    pub text: String,
    pub original_label: OptionLabel,
}

/// Per-attempt view of a question: randomized option order plus the position
/// of the correct option in that order. Created once at start time and
/// immutable for the rest of the attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShuffledQuestion {
    pub id: u32,
    pub prompt: String,
    pub image: Option<String>,
    pub options: Vec<ShuffledOption>,
    pub correct_index: usize,
}
