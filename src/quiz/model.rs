use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Options shown per question: the correct answer plus three distractors
pub const OPTION_COUNT: usize = 4;
pub const DISTRACTOR_COUNT: usize = OPTION_COUNT - 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub word: String,
    pub part_of_speech: String,
    /// Primary definition of `word`
    pub correct_answer: String,
    pub options: Vec<String>,
}

impl QuizQuestion {
    pub fn is_correct(&self, answer: &str) -> bool {
        answer == self.correct_answer
    }

    /// Position of the correct answer within `options`
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| *o == self.correct_answer)
    }
}

/// Correct answer and distractors in random order
pub fn shuffled_options<R: Rng + ?Sized>(correct_answer: &str, distractors: Vec<String>, rng: &mut R) -> Vec<String> {
    let mut options = Vec::with_capacity(OPTION_COUNT);
    options.push(correct_answer.to_string());
    options.extend(distractors);
    options.shuffle(rng);
    options
}
