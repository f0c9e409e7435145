use serde::{Serialize, Deserialize};
use std::collections::BTreeMap;

pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;
/// Words learned within this window count as "recently learned"
pub const RECENT_WINDOW_MS: i64 = 7 * DAY_MS;
/// Words not reviewed within this window "need review"
pub const REVIEW_WINDOW_MS: i64 = 3 * DAY_MS;

/// Learning state of one word. Field names on disk match the layout
/// written by earlier app versions.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(from = "StoredEntry")]
pub struct LearnedWordEntry {
    #[serde(rename = "timestamp")]
    pub learned_at_timestamp: i64,
    #[serde(rename = "lastReviewed")]
    pub last_reviewed_timestamp: i64,
    #[serde(rename = "timesCorrect")]
    pub times_reviewed_correctly: u32,
}

/// Older entries may lack `lastReviewed` and `timesCorrect`
#[derive(Deserialize)]
struct StoredEntry {
    #[serde(default)]
    timestamp: i64,
    #[serde(rename = "lastReviewed")]
    last_reviewed: Option<i64>,
    #[serde(rename = "timesCorrect", default)]
    times_correct: u32,
}

impl From<StoredEntry> for LearnedWordEntry {
    fn from(raw: StoredEntry) -> Self {
        LearnedWordEntry {
            learned_at_timestamp: raw.timestamp,
            last_reviewed_timestamp: raw.last_reviewed.unwrap_or(raw.timestamp),
            times_reviewed_correctly: raw.times_correct,
        }
    }
}

impl LearnedWordEntry {
    pub fn new(now_ms: i64) -> Self {
        LearnedWordEntry {
            learned_at_timestamp: now_ms,
            last_reviewed_timestamp: now_ms,
            times_reviewed_correctly: 1,
        }
    }

    /// Another successful review; the learned-at time never moves
    pub fn reviewed(&mut self, now_ms: i64) {
        self.times_reviewed_correctly += 1;
        self.last_reviewed_timestamp = now_ms;
    }

    pub fn is_recent(&self, now_ms: i64) -> bool {
        now_ms - self.learned_at_timestamp < RECENT_WINDOW_MS
    }

    pub fn needs_review(&self, now_ms: i64) -> bool {
        now_ms - self.last_reviewed_timestamp > REVIEW_WINDOW_MS
    }
}

/// All learned words, keyed by lowercase word
pub type LearnedWords = BTreeMap<String, LearnedWordEntry>;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LearningStats {
    pub total_learned: usize,
    pub recently_learned: usize,
    pub needs_review: usize,
}

impl LearningStats {
    pub fn from_entries(entries: &LearnedWords, now_ms: i64) -> Self {
        LearningStats {
            total_learned: entries.len(),
            recently_learned: entries.values().filter(|e| e.is_recent(now_ms)).count(),
            needs_review: entries.values().filter(|e| e.needs_review(now_ms)).count(),
        }
    }
}
