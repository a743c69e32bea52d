use std::collections::HashMap;

use crate::models::{ScoreBreakdown, ShuffledQuestion};

const MARKS_PER_CORRECT: i64 = 4;
const PENALTY_PER_INCORRECT: i64 = 1;

/// Grade an attempt. +4 per correct answer, -1 per incorrect, 0 for
/// unattempted; the total is not floored and can go negative.
pub fn calculate_score(
    questions: &[ShuffledQuestion],
    answers: &HashMap<u32, usize>,
) -> ScoreBreakdown {
    let mut correct = 0usize;
    let mut incorrect = 0usize;
    let mut unattempted = 0usize;

    for question in questions {
        match answers.get(&question.id) {
            Some(selected) if *selected == question.correct_index => correct += 1,
            Some(_) => incorrect += 1,
            None => unattempted += 1,
        }
    }

    ScoreBreakdown {
        correct,
        incorrect,
        unattempted,
        total_marks: MARKS_PER_CORRECT * correct as i64 - PENALTY_PER_INCORRECT * incorrect as i64,
        max_marks: questions.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OptionLabel, ShuffledOption};

    fn question(id: u32, correct_index: usize) -> ShuffledQuestion {
        ShuffledQuestion {
            id,
            prompt: format!("Q{}", id),
            image: None,
            options: (0..4)
                .map(|i| ShuffledOption {
                    text: format!("opt{}", i),
                    original_label: OptionLabel::ALL[i],
                })
                .collect(),
            correct_index,
        }
    }

    #[test]
    fn two_correct_one_incorrect_one_unattempted() {
        let questions = vec![question(1, 0), question(2, 1), question(3, 2), question(4, 3)];
        let mut answers = HashMap::new();
        answers.insert(1, 0); // correct
        answers.insert(2, 1); // correct
        answers.insert(3, 0); // incorrect
                              // 4 unattempted

        let score = calculate_score(&questions, &answers);
        assert_eq!(score.correct, 2);
        assert_eq!(score.incorrect, 1);
        assert_eq!(score.unattempted, 1);
        assert_eq!(score.total_marks, 7);
        assert_eq!(score.max_marks, 4);
    }

    #[test]
    fn all_wrong_goes_negative() {
        let questions = vec![question(1, 0), question(2, 0)];
        let mut answers = HashMap::new();
        answers.insert(1, 1);
        answers.insert(2, 2);

        let score = calculate_score(&questions, &answers);
        assert_eq!(score.total_marks, -2);
    }

    #[test]
    fn buckets_partition_the_questions() {
        let questions = vec![question(1, 0), question(2, 1), question(3, 2)];
        let mut answers = HashMap::new();
        answers.insert(2, 1);

        let score = calculate_score(&questions, &answers);
        assert_eq!(
            score.correct + score.incorrect + score.unattempted,
            questions.len()
        );
    }

    #[test]
    fn empty_answer_set_scores_zero() {
        let questions = vec![question(1, 0)];
        let score = calculate_score(&questions, &HashMap::new());
        assert_eq!(score.total_marks, 0);
        assert_eq!(score.unattempted, 1);
    }
}
