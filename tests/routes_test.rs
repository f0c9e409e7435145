mod common;

use std::sync::Arc;
use common::{friday_clock, FakeThesaurus};
use lexiquiz_lib::config::settings::AppConfig;
use lexiquiz_lib::error::ErrorKind;
use lexiquiz_lib::routes;
use lexiquiz_lib::storage::MemoryStore;
use lexiquiz_lib::words::lists::{ADVANCED, INTERMEDIATE};
use lexiquiz_lib::AppState;

fn app() -> AppState<FakeThesaurus, MemoryStore> {
    AppState::new(FakeThesaurus::new(), Arc::new(MemoryStore::new()), friday_clock(), &AppConfig::default())
}

#[tokio::test]
async fn test_quiz_session_end_to_end() {
    let state = app();
    let questions = routes::start_quiz(&state, Some(3)).await.unwrap();
    assert_eq!(questions.len(), 3);

    let first = routes::answer_question(&state, &questions[0].correct_answer).await.unwrap();
    assert!(first.outcome.correct);
    assert_eq!(first.outcome.next_index, Some(1));
    assert!(first.stats.is_none());

    routes::answer_question(&state, &questions[1].correct_answer).await.unwrap();

    let wrong = questions[2]
        .options
        .iter()
        .find(|o| !questions[2].is_correct(o))
        .unwrap()
        .clone();
    let last = routes::answer_question(&state, &wrong).await.unwrap();
    assert!(!last.outcome.correct);
    assert_eq!(last.outcome.correct_answer, questions[2].correct_answer);
    assert_eq!(last.outcome.next_index, None);

    let stats = last.stats.unwrap();
    assert_eq!(stats.quizzes_taken, 1);
    assert_eq!(stats.average_score, 67);
    assert_eq!(stats.streak, 1);

    let err = routes::answer_question(&state, &wrong).await.unwrap_err();
    assert!(err.is(ErrorKind::QuizSessionFinished));
    assert_eq!(routes::get_quiz_stats(&state).await, stats);
}

#[tokio::test]
async fn test_answer_without_quiz() {
    let state = app();
    let err = routes::answer_question(&state, "anything").await.unwrap_err();
    assert!(err.is(ErrorKind::QuizSessionFinished));
}

#[tokio::test]
async fn test_submit_and_reset() {
    let state = app();
    let stats = routes::submit_quiz(&state, 7, 10).await;
    assert_eq!(stats.average_score, 70);

    let reset = routes::reset_quiz_stats(&state).await;
    assert_eq!(reset.quizzes_taken, 0);
    assert_eq!(routes::get_quiz_stats(&state).await, reset);
}

#[tokio::test]
async fn test_profile_summary() {
    let state = app();
    routes::mark_word_learned(&state, "gratitude").await.unwrap();
    routes::mark_word_learned(&state, "keen").await.unwrap();
    routes::submit_quiz(&state, 4, 5).await;

    assert!(routes::is_word_learned(&state, "Keen").await);
    assert_eq!(routes::get_learning_stats(&state).await.total_learned, 2);

    let summary = routes::get_profile_summary(&state).await;
    assert_eq!(summary.words_learned, 2);
    assert_eq!(summary.recently_learned, 2);
    assert_eq!(summary.needs_review, 0);
    assert_eq!(summary.quizzes_taken, 1);
    assert_eq!(summary.average_score, 80);
    assert_eq!(summary.streak, 1);
    assert_eq!(summary.weekly_progress[5], 80);

    routes::clear_learned_words(&state).await;
    assert_eq!(routes::get_profile_summary(&state).await.words_learned, 0);
}

#[tokio::test]
async fn test_word_commands() {
    let state = app();

    let record = routes::fetch_word(&state, "Eloquent").await.unwrap();
    assert_eq!(record.word, "eloquent");

    let record = routes::fetch_word(&state, "!!!").await.unwrap();
    assert!(INTERMEDIATE.contains(&record.word.as_str()));

    let record = routes::random_word(&state, Some("advanced")).await.unwrap();
    assert!(ADVANCED.contains(&record.word.as_str()));

    let record = routes::random_word(&state, Some("expert")).await.unwrap();
    assert!(INTERMEDIATE.contains(&record.word.as_str()));

    let today = routes::word_of_day(&state).await.unwrap();
    assert_eq!(today, routes::word_of_day(&state).await.unwrap());

    let metrics = routes::get_metrics(&state);
    assert_eq!(metrics.invalid_inputs, 1);
    assert_eq!(metrics.words_fetched, 6);
}

#[tokio::test]
async fn test_generate_quiz_does_not_start_session() {
    let state = app();
    let questions = routes::generate_quiz(&state, None).await.unwrap();
    assert_eq!(questions.len(), 10);
    assert!(routes::answer_question(&state, &questions[0].correct_answer).await.is_err());
}
