use rand::Rng;

use crate::models::{Question, ShuffledOption, ShuffledQuestion};

/// Produce the per-attempt view of a question: an unbiased random permutation
/// of its four options plus the position of the correct one in the new order.
///
/// The RNG is injected so deterministic tests can fix a seed; production
/// wiring passes `rand::rng()`.
pub fn shuffle_question<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> ShuffledQuestion {
    let mut options: Vec<ShuffledOption> = question
        .options()
        .iter()
        .map(|(label, text)| ShuffledOption {
            text: (*text).to_string(),
            original_label: *label,
        })
        .collect();

    // Fisher-Yates, uniform over all 24 orderings
    for i in (1..options.len()).rev() {
        let j = rng.random_range(0..=i);
        options.swap(i, j);
    }

    let correct_index = options
        .iter()
        .position(|opt| opt.original_label == question.correct_option)
        .unwrap_or(0);

    ShuffledQuestion {
        id: question.id,
        prompt: question.prompt.clone(),
        image: question.image.clone(),
        options,
        correct_index,
    }
}
