//! Thesaurus boundary: anything that can turn a word into the raw JSON
//! payload the normalizer understands.

pub mod client;

pub use client::MerriamWebsterClient;

use serde_json::Value;
use crate::error::VocabError;

#[allow(async_fn_in_trait)]
pub trait ThesaurusApi: Send + Sync {
    /// Raw response for `word`: an array of entries, or an array of
    /// spelling suggestions when the word is unknown.
    async fn fetch_entries(&self, word: &str) -> Result<Value, VocabError>;
}
