use std::collections::{BTreeSet, HashMap, HashSet};

use crate::models::{ShuffledQuestion, StatusCounts};

/// Classify every question into exactly one of the five palette buckets.
///
/// Precedence: answered+marked > answered > marked-for-review >
/// visited-not-answered > not-visited. The counts partition the question set.
pub fn status_counts(
    questions: &[ShuffledQuestion],
    answers: &HashMap<u32, usize>,
    marked: &HashSet<u32>,
    visited: &BTreeSet<usize>,
) -> StatusCounts {
    let mut counts = StatusCounts {
        answered: 0,
        visited_not_answered: 0,
        not_visited: 0,
        marked_for_review: 0,
        answered_marked: 0,
    };

    for (index, question) in questions.iter().enumerate() {
        let is_answered = answers.contains_key(&question.id);
        let is_marked = marked.contains(&question.id);
        let is_visited = visited.contains(&index);

        if is_answered && is_marked {
            counts.answered_marked += 1;
        } else if is_answered {
            counts.answered += 1;
        } else if is_marked {
            counts.marked_for_review += 1;
        } else if is_visited {
            counts.visited_not_answered += 1;
        } else {
            counts.not_visited += 1;
        }
    }

    counts
}
