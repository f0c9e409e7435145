#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;
use parking_lot::Mutex;
use serde_json::{json, Value};
use lexiquiz_lib::clock::FixedClock;
use lexiquiz_lib::error::VocabError;
use lexiquiz_lib::thesaurus::ThesaurusApi;
use lexiquiz_lib::words::lists;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Definitions {
    /// "definition of <word>"
    Distinct,
    /// Every word shares one definition
    Same,
    /// No `shortdef` at all
    Empty,
}

/// In-process thesaurus: every listed word resolves, anything else gets
/// spelling suggestions back
pub struct FakeThesaurus {
    definitions: Definitions,
    failing: Mutex<HashSet<String>>,
    fail_all: Mutex<bool>,
    calls: Mutex<Vec<String>>,
}

impl FakeThesaurus {
    pub fn new() -> Self {
        Self::with_definitions(Definitions::Distinct)
    }

    pub fn with_definitions(definitions: Definitions) -> Self {
        FakeThesaurus {
            definitions,
            failing: Mutex::new(HashSet::new()),
            fail_all: Mutex::new(false),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_word(&self, word: &str) {
        self.failing.lock().insert(word.to_string());
    }

    pub fn fail_everything(&self) {
        *self.fail_all.lock() = true;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn payload(&self, word: &str) -> Value {
        let shortdef = match self.definitions {
            Definitions::Distinct => json!([format!("definition of {}", word)]),
            Definitions::Same => json!(["a word"]),
            Definitions::Empty => json!([]),
        };
        json!([{
            "meta": {
                "id": format!("{}:1", word),
                "syns": [[format!("{}-synonym", word)]],
                "ants": [],
                "offensive": false
            },
            "fl": "adjective",
            "shortdef": shortdef,
            "def": [{
                "sseq": [[["sense", {"dt": [["vis", [{"t": format!("a {{it}}{}{{/it}} example", word)}]]]}]]]
            }]
        }])
    }
}

pub fn is_listed(word: &str) -> bool {
    lists::difficulty_of(word).is_some()
}

impl ThesaurusApi for FakeThesaurus {
    async fn fetch_entries(&self, word: &str) -> Result<Value, VocabError> {
        self.calls.lock().push(word.to_string());
        if *self.fail_all.lock() || self.failing.lock().contains(word) {
            return Err(VocabError::fetch_failed("Thesaurus server error: 503")
                .with_word(word)
                .with_retryable(true));
        }
        if !is_listed(word) {
            return Ok(json!(["candid", "candied"]));
        }
        Ok(self.payload(word))
    }
}

/// Friday 2026-10-16, noon
pub fn friday_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::at_date(2026, 10, 16).unwrap())
}
