use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Process counters. Clones share the same counters.
#[derive(Clone, Default, Debug)]
pub struct Metrics {
    /// Records successfully fetched and normalized
    pub words_fetched: Arc<AtomicU64>,
    /// Fetches that ended in an error (before any fallback)
    pub fetch_failures: Arc<AtomicU64>,
    /// Random words substituted after a failed fetch
    pub fallback_substitutions: Arc<AtomicU64>,
    /// Rejected word inputs that were replaced by a random word
    pub invalid_inputs: Arc<AtomicU64>,
    pub quizzes_generated: Arc<AtomicU64>,
    /// Storage reads/writes that failed and were degraded
    pub storage_errors: Arc<AtomicU64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub words_fetched: u64,
    pub fetch_failures: u64,
    pub fallback_substitutions: u64,
    pub invalid_inputs: u64,
    pub quizzes_generated: u64,
    pub storage_errors: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_word_fetched(&self) {
        self.words_fetched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback(&self) {
        self.fallback_substitutions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_invalid_input(&self) {
        self.invalid_inputs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_quiz_generated(&self) {
        self.quizzes_generated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_storage_error(&self) {
        self.storage_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            words_fetched: self.words_fetched.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            fallback_substitutions: self.fallback_substitutions.load(Ordering::Relaxed),
            invalid_inputs: self.invalid_inputs.load(Ordering::Relaxed),
            quizzes_generated: self.quizzes_generated.load(Ordering::Relaxed),
            storage_errors: self.storage_errors.load(Ordering::Relaxed),
        }
    }
}
