use std::sync::atomic::{AtomicUsize, Ordering};
use crate::error::VocabError;
use super::KeyValueStore;

/// Store whose reads always fail; writes are counted and dropped
#[derive(Debug, Default)]
pub struct UnreadableStore {
    writes: AtomicUsize,
}

impl UnreadableStore {
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }
}

impl KeyValueStore for UnreadableStore {
    async fn get(&self, key: &str) -> Result<Option<String>, VocabError> {
        Err(VocabError::storage("device unavailable").with_context(format!("key: {}", key)))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), VocabError> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn remove(&self, _key: &str) -> Result<(), VocabError> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
