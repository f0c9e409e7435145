use serde::{Deserialize, Serialize};
use crate::error::{ErrorKind, VocabError};
use crate::quiz::model::QuizQuestion;
use crate::quiz::stats::{QuizStatistics, QuizStatsStore};
use crate::storage::KeyValueStore;

/// Where a quiz session currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizState {
    /// Waiting for the answer to `questions[index]`
    InProgress { index: usize },
    /// Every question answered
    Completed { score: u32, total: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_answer: String,
    /// Index of the next question, `None` once the quiz is over
    pub next_index: Option<usize>,
}

/// One pass through a generated quiz
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    state: QuizState,
    score: u32,
    recorded: bool,
}

impl QuizSession {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        let state = if questions.is_empty() {
            QuizState::Completed { score: 0, total: 0 }
        } else {
            QuizState::InProgress { index: 0 }
        };
        QuizSession { questions, state, score: 0, recorded: false }
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.state, QuizState::Completed { .. })
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.state {
            QuizState::InProgress { index } => self.questions.get(index),
            QuizState::Completed { .. } => None,
        }
    }

    /// Answer the current question and move on
    pub fn answer(&mut self, option: &str) -> Result<AnswerOutcome, VocabError> {
        let QuizState::InProgress { index } = self.state else {
            return Err(VocabError::new(
                ErrorKind::QuizSessionFinished,
                "All questions have already been answered",
                "quiz_session",
            ));
        };
        let question = &self.questions[index];
        let correct = question.is_correct(option);
        if correct {
            self.score += 1;
        }
        let correct_answer = question.correct_answer.clone();

        let next = index + 1;
        let next_index = if next < self.questions.len() {
            self.state = QuizState::InProgress { index: next };
            Some(next)
        } else {
            self.state = QuizState::Completed {
                score: self.score,
                total: self.questions.len() as u32,
            };
            None
        };

        tracing::debug!(word = %question.word, correct = correct, "Quiz answer");
        Ok(AnswerOutcome { correct, correct_answer, next_index })
    }

    /// Record the result in the statistics store.
    /// Only a completed, non-empty session is recorded, and only once.
    pub async fn finish<S: KeyValueStore>(&mut self, stats: &QuizStatsStore<S>) -> Option<QuizStatistics> {
        let QuizState::Completed { score, total } = self.state else {
            return None;
        };
        if self.recorded || total == 0 {
            return None;
        }
        self.recorded = true;
        Some(stats.record(score, total).await)
    }
}
