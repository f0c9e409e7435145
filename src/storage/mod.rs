//! Key-value persistence boundary.
//!
//! The stores above this layer only ever read and write whole JSON documents
//! under a handful of keys, so the interface is deliberately string-in,
//! string-out. Failures come back as `StorageAccessFailed`; deciding whether
//! to degrade is up to the caller.
//!
//! The stores share one policy: a value that was read but cannot be decoded
//! is treated as absent and replaced on the next write, while a failed read
//! skips the write so data that may still be intact is never overwritten.

pub mod file;
pub mod memory;
#[cfg(test)]
pub(crate) mod testing;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::{de::DeserializeOwned, Serialize};
use crate::error::VocabError;

/// Async string key-value store
#[allow(async_fn_in_trait)]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, VocabError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), VocabError>;
    async fn remove(&self, key: &str) -> Result<(), VocabError>;
}

/// Decode a raw stored value read from `key`. Undecodable data is a storage failure.
pub fn decode_json<T: DeserializeOwned>(key: &str, raw: &str) -> Result<T, VocabError> {
    serde_json::from_str::<T>(raw)
        .map_err(|e| VocabError::storage(format!("Failed to decode stored value: {}", e))
            .with_context(format!("key: {}", key))
            .with_source("serde_json"))
}

/// Encode and write a JSON document
pub async fn save_json<T, S>(store: &S, key: &str, value: &T) -> Result<(), VocabError>
where
    T: Serialize,
    S: KeyValueStore,
{
    let json = serde_json::to_string(value)
        .map_err(|e| VocabError::storage(format!("Failed to encode value: {}", e))
            .with_context(format!("key: {}", key))
            .with_source("serde_json"))?;
    store.set(key, &json).await
}
