use std::collections::HashSet;
use std::sync::Arc;
use crate::config::settings::QuizConfig;
use crate::error::{ErrorKind, VocabError};
use crate::metrics::Metrics;
use crate::perf;
use crate::thesaurus::ThesaurusApi;
use crate::words::lists;
use crate::words::model::{Difficulty, WordRecord};
use crate::words::source::WordSource;
use super::model::{shuffled_options, QuizQuestion, DISTRACTOR_COUNT, OPTION_COUNT};

/// Builds multiple-choice definition quizzes from random thesaurus words.
///
/// Every draw (question word or distractor) counts against a per-question
/// attempt budget, so small word lists or repetitive definitions end in
/// `QuizGenerationExhausted` instead of an endless loop.
pub struct QuizGenerator<A: ThesaurusApi> {
    source: Arc<WordSource<A>>,
    tier: Difficulty,
    default_count: usize,
    max_attempts_per_question: usize,
    metrics: Metrics,
}

impl<A: ThesaurusApi> QuizGenerator<A> {
    pub fn new(source: Arc<WordSource<A>>, config: &QuizConfig, metrics: Metrics) -> Self {
        QuizGenerator {
            source,
            tier: Difficulty::parse_lenient(&config.tier),
            default_count: config.question_count,
            max_attempts_per_question: config.max_attempts_per_question.max(OPTION_COUNT),
            metrics,
        }
    }

    pub fn with_tier(mut self, tier: Difficulty) -> Self {
        self.tier = tier;
        self
    }

    pub fn tier(&self) -> Difficulty {
        self.tier
    }

    pub fn default_count(&self) -> usize {
        self.default_count
    }

    /// Quiz of the configured default length
    pub async fn generate_default(&self) -> Result<Vec<QuizQuestion>, VocabError> {
        self.generate(self.default_count).await
    }

    /// Exactly `count` questions with distinct words
    pub async fn generate(&self, count: usize) -> Result<Vec<QuizQuestion>, VocabError> {
        let _perf = perf::PerfTimer::new("quiz_generation");

        let available = lists::words_for(self.tier).len();
        if count > available {
            return Err(exhausted(format!(
                "Requested {} questions but the {} list has only {} words",
                count, self.tier, available
            )));
        }

        let mut used: HashSet<String> = HashSet::with_capacity(count);
        let mut questions = Vec::with_capacity(count);
        while questions.len() < count {
            let question = self.next_question(&used).await.map_err(|e| {
                if e.is(ErrorKind::QuizGenerationExhausted) {
                    e.with_context(format!("question {} of {}", questions.len() + 1, count))
                } else {
                    e
                }
            })?;
            used.insert(question.word.clone());
            questions.push(question);
        }

        self.metrics.record_quiz_generated();
        tracing::info!(count = count, tier = %self.tier, "Quiz generated");
        Ok(questions)
    }

    async fn next_question(&self, used: &HashSet<String>) -> Result<QuizQuestion, VocabError> {
        let mut attempts = 0usize;

        let target = loop {
            self.spend_attempt(&mut attempts, "question word")?;
            let record = self.source.fetch_random_unused(self.tier, used).await?;
            if used.contains(&record.word) {
                tracing::debug!(word = %record.word, "Word already used in this quiz, redrawing");
                continue;
            }
            if primary_definition(&record).is_none() {
                tracing::debug!(word = %record.word, "Word has no definition, redrawing");
                continue;
            }
            break record;
        };
        let correct_answer = primary_definition(&target).unwrap_or_default().to_string();

        let mut distractors: Vec<String> = Vec::with_capacity(DISTRACTOR_COUNT);
        while distractors.len() < DISTRACTOR_COUNT {
            self.spend_attempt(&mut attempts, "distractors")?;
            let tier = lists::random_tier(&mut rand::thread_rng());
            let candidate = self.source.fetch_random(tier).await?;
            if candidate.word == target.word {
                continue;
            }
            let Some(definition) = primary_definition(&candidate) else {
                continue;
            };
            if definition == correct_answer || distractors.iter().any(|d| d == definition) {
                continue;
            }
            distractors.push(definition.to_string());
        }

        let options = shuffled_options(&correct_answer, distractors, &mut rand::thread_rng());

        Ok(QuizQuestion {
            word: target.word,
            part_of_speech: target.part_of_speech,
            correct_answer,
            options,
        })
    }

    fn spend_attempt(&self, attempts: &mut usize, phase: &str) -> Result<(), VocabError> {
        if *attempts >= self.max_attempts_per_question {
            tracing::warn!(
                attempts = *attempts,
                phase = phase,
                tier = %self.tier,
                "Quiz question attempt budget exhausted"
            );
            return Err(exhausted(format!(
                "No valid {} after {} draws",
                phase, attempts
            )));
        }
        *attempts += 1;
        Ok(())
    }
}

fn primary_definition(record: &WordRecord) -> Option<&str> {
    record
        .primary_definition()
        .map(str::trim)
        .filter(|d| !d.is_empty())
}

fn exhausted(message: String) -> VocabError {
    VocabError::new(ErrorKind::QuizGenerationExhausted, message, "quiz")
}
