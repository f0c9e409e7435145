mod common;

use std::collections::HashSet;
use std::sync::Arc;
use common::{Definitions, FakeThesaurus};
use lexiquiz_lib::config::settings::QuizConfig;
use lexiquiz_lib::error::ErrorKind;
use lexiquiz_lib::metrics::Metrics;
use lexiquiz_lib::quiz::QuizGenerator;
use lexiquiz_lib::words::lists::{BEGINNER, INTERMEDIATE};
use lexiquiz_lib::words::{Difficulty, WordSource};

fn generator(definitions: Definitions) -> (QuizGenerator<FakeThesaurus>, Arc<WordSource<FakeThesaurus>>, Metrics) {
    let metrics = Metrics::new();
    let source = Arc::new(WordSource::new(FakeThesaurus::with_definitions(definitions), metrics.clone()));
    let generator = QuizGenerator::new(source.clone(), &QuizConfig::default(), metrics.clone());
    (generator, source, metrics)
}

#[tokio::test]
async fn test_generate_default_quiz() {
    let (generator, _, metrics) = generator(Definitions::Distinct);
    let questions = generator.generate_default().await.unwrap();

    assert_eq!(generator.default_count(), 10);
    assert_eq!(questions.len(), generator.default_count());
    let words: HashSet<&str> = questions.iter().map(|q| q.word.as_str()).collect();
    assert_eq!(words.len(), 10, "question words should be unique");

    for question in &questions {
        assert!(INTERMEDIATE.contains(&question.word.as_str()));
        assert_eq!(question.correct_answer, format!("definition of {}", question.word));
        assert_eq!(question.options.len(), 4);
        let unique: HashSet<&String> = question.options.iter().collect();
        assert_eq!(unique.len(), 4, "options should be unique: {:?}", question.options);
        assert_eq!(question.options.iter().filter(|o| question.is_correct(o)).count(), 1);
        assert!(question.correct_index().is_some());
    }
    assert_eq!(metrics.snapshot().quizzes_generated, 1);
}

#[tokio::test]
async fn test_generate_with_other_tier() {
    let (generator, _, _) = generator(Definitions::Distinct);
    let generator = generator.with_tier(Difficulty::Beginner);
    assert_eq!(generator.tier(), Difficulty::Beginner);
    let questions = generator.generate(5).await.unwrap();
    assert_eq!(questions.len(), 5);
    assert!(questions.iter().all(|q| BEGINNER.contains(&q.word.as_str())));
}

#[tokio::test]
async fn test_quiz_can_use_every_word_of_the_tier() {
    let (generator, _, _) = generator(Definitions::Distinct);
    for _ in 0..25 {
        let questions = generator.generate(INTERMEDIATE.len()).await.unwrap();
        let words: HashSet<&str> = questions.iter().map(|q| q.word.as_str()).collect();
        assert_eq!(words.len(), INTERMEDIATE.len());
    }
}

#[tokio::test]
async fn test_zero_questions() {
    let (generator, source, _) = generator(Definitions::Distinct);
    assert!(generator.generate(0).await.unwrap().is_empty());
    assert!(source.api().calls().is_empty());
}

#[tokio::test]
async fn test_more_questions_than_words_is_exhausted() {
    let (generator, source, metrics) = generator(Definitions::Distinct);
    let err = generator.generate(INTERMEDIATE.len() + 1).await.unwrap_err();
    assert!(err.is(ErrorKind::QuizGenerationExhausted));
    assert!(source.api().calls().is_empty());
    assert_eq!(metrics.snapshot().quizzes_generated, 0);
}

#[tokio::test]
async fn test_identical_definitions_exhaust_distractors() {
    let (generator, source, _) = generator(Definitions::Same);
    let err = generator.generate(1).await.unwrap_err();
    assert!(err.is(ErrorKind::QuizGenerationExhausted));
    assert_eq!(err.context.as_deref(), Some("question 1 of 1"));
    assert_eq!(source.api().calls().len(), QuizConfig::default().max_attempts_per_question);
}

#[tokio::test]
async fn test_missing_definitions_exhaust_question_words() {
    let (generator, _, _) = generator(Definitions::Empty);
    let err = generator.generate(3).await.unwrap_err();
    assert!(err.is(ErrorKind::QuizGenerationExhausted));
}
