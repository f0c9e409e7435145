//! Command functions for the UI shell. Each one takes the shared
//! [`AppState`] and returns a serializable result.

use serde::{Deserialize, Serialize};
use crate::analytics::ProfileSummary;
use crate::error::{ErrorKind, VocabError};
use crate::metrics::MetricsSnapshot;
use crate::progress::{LearnedWordEntry, LearningStats};
use crate::quiz::{QuizQuestion, QuizStatistics};
use crate::state::app::AppState;
use crate::state::session::{AnswerOutcome, QuizSession};
use crate::storage::KeyValueStore;
use crate::thesaurus::ThesaurusApi;
use crate::words::{Difficulty, WordRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResponse {
    #[serde(flatten)]
    pub outcome: AnswerOutcome,
    /// Updated statistics once the last question has been answered
    pub stats: Option<QuizStatistics>,
}

/// Word details for the flashcard screen; bad input or a failed fetch
/// falls back to a random word
pub async fn fetch_word<A: ThesaurusApi, S: KeyValueStore>(
    state: &AppState<A, S>,
    word: &str,
) -> Result<WordRecord, VocabError> {
    state.words.lookup(word).await
}

pub async fn random_word<A: ThesaurusApi, S: KeyValueStore>(
    state: &AppState<A, S>,
    tier: Option<&str>,
) -> Result<WordRecord, VocabError> {
    let tier = tier.map(Difficulty::parse_lenient).unwrap_or_default();
    state.words.fetch_random(tier).await
}

pub async fn word_of_day<A: ThesaurusApi, S: KeyValueStore>(
    state: &AppState<A, S>,
) -> Result<WordRecord, VocabError> {
    state.words.word_of_day(state.clock.today()).await
}

/// Questions only; nothing is tracked
pub async fn generate_quiz<A: ThesaurusApi, S: KeyValueStore>(
    state: &AppState<A, S>,
    count: Option<usize>,
) -> Result<Vec<QuizQuestion>, VocabError> {
    match count {
        Some(count) => state.quiz.generate(count).await,
        None => state.quiz.generate_default().await,
    }
}

/// Generate a quiz and make it the running session
pub async fn start_quiz<A: ThesaurusApi, S: KeyValueStore>(
    state: &AppState<A, S>,
    count: Option<usize>,
) -> Result<Vec<QuizQuestion>, VocabError> {
    let questions = generate_quiz(state, count).await?;
    state.set_session(QuizSession::new(questions.clone()));
    tracing::info!(questions = questions.len(), "Quiz session started");
    Ok(questions)
}

/// Answer the current question of the running session.
/// Answering the last question records the result.
pub async fn answer_question<A: ThesaurusApi, S: KeyValueStore>(
    state: &AppState<A, S>,
    option: &str,
) -> Result<AnswerResponse, VocabError> {
    let (outcome, complete) = state
        .with_session(|session| session.answer(option).map(|o| (o, session.is_complete())))
        .ok_or_else(|| VocabError::new(ErrorKind::QuizSessionFinished, "No quiz in progress", "quiz_session"))??;

    let stats = if complete {
        match state.take_session() {
            Some(mut session) => session.finish(&state.quiz_stats).await,
            None => None,
        }
    } else {
        None
    };

    Ok(AnswerResponse { outcome, stats })
}

/// Record a quiz scored by the caller
pub async fn submit_quiz<A: ThesaurusApi, S: KeyValueStore>(
    state: &AppState<A, S>,
    score: u32,
    total_questions: u32,
) -> QuizStatistics {
    state.quiz_stats.record(score, total_questions).await
}

pub async fn mark_word_learned<A: ThesaurusApi, S: KeyValueStore>(
    state: &AppState<A, S>,
    word: &str,
) -> Result<LearnedWordEntry, VocabError> {
    state.progress.mark_learned(word).await
}

pub async fn is_word_learned<A: ThesaurusApi, S: KeyValueStore>(state: &AppState<A, S>, word: &str) -> bool {
    state.progress.is_learned(word).await
}

pub async fn get_learning_stats<A: ThesaurusApi, S: KeyValueStore>(state: &AppState<A, S>) -> LearningStats {
    state.progress.get_stats().await
}

pub async fn get_quiz_stats<A: ThesaurusApi, S: KeyValueStore>(state: &AppState<A, S>) -> QuizStatistics {
    state.quiz_stats.get_stats().await
}

pub async fn reset_quiz_stats<A: ThesaurusApi, S: KeyValueStore>(state: &AppState<A, S>) -> QuizStatistics {
    state.quiz_stats.reset().await
}

pub async fn clear_learned_words<A: ThesaurusApi, S: KeyValueStore>(state: &AppState<A, S>) {
    state.progress.clear().await
}

pub async fn get_profile_summary<A: ThesaurusApi, S: KeyValueStore>(state: &AppState<A, S>) -> ProfileSummary {
    state.profile_summary().await
}

pub fn get_metrics<A: ThesaurusApi, S: KeyValueStore>(state: &AppState<A, S>) -> MetricsSnapshot {
    state.metrics.snapshot()
}
