use std::collections::HashSet;
use chrono::NaiveDate;
use crate::error::VocabError;
use crate::metrics::Metrics;
use crate::thesaurus::ThesaurusApi;
use super::lists;
use super::model::{Difficulty, WordRecord};
use super::normalize::normalize;

/// Fetches normalized word records from the thesaurus.
///
/// Invalid input never reaches the caller as an error: a random
/// intermediate word is looked up instead. Random draws that fail are
/// retried once with a different word from the same tier.
pub struct WordSource<A: ThesaurusApi> {
    api: A,
    metrics: Metrics,
}

impl<A: ThesaurusApi> WordSource<A> {
    pub fn new(api: A, metrics: Metrics) -> Self {
        WordSource { api, metrics }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Record for exactly this word. Fetch and payload errors are surfaced.
    pub async fn fetch_by_name(&self, word: &str) -> Result<WordRecord, VocabError> {
        match lists::validate_word(word) {
            Ok(valid) => self.fetch_normalized(&valid).await,
            Err(e) => self.substitute_invalid(word, e).await,
        }
    }

    /// Random word of a tier, with one fallback substitution
    pub async fn fetch_random(&self, tier: Difficulty) -> Result<WordRecord, VocabError> {
        let word = lists::random_word(tier, &mut rand::thread_rng());
        self.fetch_with_fallback(word, tier, &HashSet::new()).await
    }

    /// Random word of a tier that is not in `used`; the fallback substitute
    /// avoids `used` as well. Any word of the tier is drawn once all are used.
    pub async fn fetch_random_unused(&self, tier: Difficulty, used: &HashSet<String>) -> Result<WordRecord, VocabError> {
        let word = {
            let mut rng = rand::thread_rng();
            lists::random_word_where(tier, |w| !used.contains(w), &mut rng)
                .unwrap_or_else(|| lists::random_word(tier, &mut rng))
        };
        self.fetch_with_fallback(word, tier, used).await
    }

    /// Like [`fetch_by_name`](Self::fetch_by_name), but a failed fetch is
    /// answered with a random intermediate word instead of an error.
    pub async fn lookup(&self, word: &str) -> Result<WordRecord, VocabError> {
        match lists::validate_word(word) {
            Ok(valid) => self.fetch_with_fallback(&valid, Difficulty::Intermediate, &HashSet::new()).await,
            Err(e) => self.substitute_invalid(word, e).await,
        }
    }

    /// Same intermediate word for the whole calendar day
    pub async fn word_of_day(&self, date: NaiveDate) -> Result<WordRecord, VocabError> {
        self.fetch_with_fallback(lists::word_for_date(date), Difficulty::Intermediate, &HashSet::new()).await
    }

    async fn substitute_invalid(&self, raw: &str, error: VocabError) -> Result<WordRecord, VocabError> {
        self.metrics.record_invalid_input();
        let substitute = lists::random_word(Difficulty::Intermediate, &mut rand::thread_rng());
        tracing::warn!(
            input = ?raw,
            substitute = substitute,
            error = %error,
            "Invalid word input, substituting random word"
        );
        self.fetch_with_fallback(substitute, Difficulty::Intermediate, &HashSet::new()).await
    }

    async fn fetch_with_fallback(
        &self,
        word: &str,
        tier: Difficulty,
        avoid: &HashSet<String>,
    ) -> Result<WordRecord, VocabError> {
        let first = match self.fetch_normalized(word).await {
            Ok(record) => return Ok(record),
            Err(e) => e,
        };

        self.metrics.record_fallback();
        let substitute = {
            let mut rng = rand::thread_rng();
            lists::random_word_where(tier, |w| w != word && !avoid.contains(w), &mut rng)
                .unwrap_or_else(|| lists::random_word_except(tier, word, &mut rng))
        };
        tracing::warn!(
            word = word,
            substitute = substitute,
            error = %first,
            "Word fetch failed, trying substitute"
        );

        self.fetch_normalized(substitute).await.map_err(|second| {
            VocabError::fetch_failed(format!(
                "Failed to fetch '{}' and substitute '{}'",
                word, substitute
            ))
            .with_word(word)
            .with_context(format!("first: {}; substitute: {}", first, second))
        })
    }

    async fn fetch_normalized(&self, word: &str) -> Result<WordRecord, VocabError> {
        let result = match self.api.fetch_entries(word).await {
            Ok(payload) => normalize(&payload).map_err(|e| e.with_word(word)),
            Err(e) => Err(e),
        };

        match &result {
            Ok(record) => {
                self.metrics.record_word_fetched();
                tracing::debug!(word = word, resolved = %record.word, "Fetched word");
            }
            Err(e) => {
                self.metrics.record_fetch_failure();
                tracing::debug!(word = word, error = %e, "Word fetch failed");
            }
        }
        result
    }
}
