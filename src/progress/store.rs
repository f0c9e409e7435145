use std::sync::Arc;
use crate::clock::Clock;
use crate::error::VocabError;
use crate::metrics::Metrics;
use crate::storage::{decode_json, save_json, KeyValueStore};
use super::model::{LearnedWordEntry, LearnedWords, LearningStats};

pub const LEARNED_WORDS_KEY: &str = "@learned_words";

/// Per-word learning state, kept as one JSON mapping in the key-value store.
///
/// Every operation re-reads the whole mapping. `mark_learned` is a
/// read-modify-write without a lock in between, so two overlapping calls can
/// lose one update.
pub struct LearningProgressStore<S: KeyValueStore> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    metrics: Metrics,
}

fn word_key(word: &str) -> String {
    word.trim().to_lowercase()
}

impl<S: KeyValueStore> LearningProgressStore<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>, metrics: Metrics) -> Self {
        LearningProgressStore { store, clock, metrics }
    }

    /// Mark a word as learned, or count another correct review if it already is.
    ///
    /// `Ok` does not mean the entry was saved: when the stored mapping cannot
    /// be read the write is skipped and a fresh entry is returned. An
    /// undecodable mapping is read as empty and replaced.
    pub async fn mark_learned(&self, word: &str) -> Result<LearnedWordEntry, VocabError> {
        let key = word_key(word);
        if key.is_empty() {
            return Err(VocabError::invalid_input("Cannot mark an empty word as learned"));
        }

        let now = self.clock.now_millis();
        let loaded = self.load().await;

        let mut entries = match loaded {
            Ok(entries) => entries,
            Err(e) => {
                self.storage_failed("load learned words", &e);
                return Ok(LearnedWordEntry::new(now));
            }
        };

        let entry = entries
            .entry(key.clone())
            .and_modify(|e| e.reviewed(now))
            .or_insert_with(|| LearnedWordEntry::new(now));
        let entry = *entry;

        if let Err(e) = save_json(self.store.as_ref(), LEARNED_WORDS_KEY, &entries).await {
            self.storage_failed("save learned words", &e);
        }

        tracing::info!(
            word = %key,
            times_correct = entry.times_reviewed_correctly,
            total_learned = entries.len(),
            "Word marked as learned"
        );
        Ok(entry)
    }

    pub async fn is_learned(&self, word: &str) -> bool {
        self.entry(word).await.is_some()
    }

    pub async fn entry(&self, word: &str) -> Option<LearnedWordEntry> {
        let key = word_key(word);
        self.learned_words().await.get(&key).copied()
    }

    /// All entries; empty when nothing is stored or storage is unreadable
    pub async fn learned_words(&self) -> LearnedWords {
        match self.load().await {
            Ok(entries) => entries,
            Err(e) => {
                self.storage_failed("load learned words", &e);
                LearnedWords::new()
            }
        }
    }

    pub async fn get_stats(&self) -> LearningStats {
        let entries = self.learned_words().await;
        LearningStats::from_entries(&entries, self.clock.now_millis())
    }

    /// Forget every learned word
    pub async fn clear(&self) {
        if let Err(e) = self.store.remove(LEARNED_WORDS_KEY).await {
            self.storage_failed("clear learned words", &e);
            return;
        }
        tracing::info!("Learned words cleared");
    }

    /// Stored mapping. Only a failed read is an error; an undecodable
    /// mapping is logged and read as empty.
    async fn load(&self) -> Result<LearnedWords, VocabError> {
        let Some(raw) = self.store.get(LEARNED_WORDS_KEY).await? else {
            return Ok(LearnedWords::new());
        };
        match decode_json::<LearnedWords>(LEARNED_WORDS_KEY, &raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                self.storage_failed("decode learned words", &e);
                Ok(LearnedWords::new())
            }
        }
    }

    fn storage_failed(&self, operation: &str, error: &VocabError) {
        self.metrics.record_storage_error();
        tracing::warn!(operation = operation, error = %error, "Storage access failed, continuing with defaults");
    }
}
