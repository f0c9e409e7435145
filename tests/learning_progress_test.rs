mod common;

use std::sync::Arc;
use chrono::Duration;
use common::friday_clock;
use lexiquiz_lib::clock::{Clock, FixedClock};
use lexiquiz_lib::metrics::Metrics;
use lexiquiz_lib::progress::store::LEARNED_WORDS_KEY;
use lexiquiz_lib::progress::{LearningProgressStore, LearningStats};
use lexiquiz_lib::storage::{FileStore, KeyValueStore, MemoryStore};

fn progress_store() -> (LearningProgressStore<MemoryStore>, Arc<MemoryStore>, Arc<FixedClock>) {
    let store = Arc::new(MemoryStore::new());
    let clock = friday_clock();
    (LearningProgressStore::new(store.clone(), clock.clone(), Metrics::new()), store, clock)
}

#[tokio::test]
async fn test_mark_learned_twice() {
    let (progress, _, clock) = progress_store();
    let learned_at = clock.now_millis();

    let first = progress.mark_learned("gratitude").await.unwrap();
    assert_eq!(first.times_reviewed_correctly, 1);
    assert_eq!(first.learned_at_timestamp, learned_at);
    assert_eq!(first.last_reviewed_timestamp, learned_at);

    clock.advance(Duration::hours(2));
    let second = progress.mark_learned("gratitude").await.unwrap();
    assert_eq!(second.times_reviewed_correctly, 2);
    assert_eq!(second.learned_at_timestamp, learned_at);
    assert_eq!(second.last_reviewed_timestamp, learned_at + 2 * 3_600_000);

    assert_eq!(progress.entry("gratitude").await, Some(second));
    assert!(progress.is_learned("gratitude").await);
    assert!(!progress.is_learned("candid").await);
}

#[tokio::test]
async fn test_stats_windows() {
    let (progress, _, clock) = progress_store();
    assert_eq!(progress.get_stats().await, LearningStats::default());

    progress.mark_learned("candid").await.unwrap();
    clock.advance(Duration::days(4));
    progress.mark_learned("serene").await.unwrap();

    let stats = progress.get_stats().await;
    assert_eq!(stats, LearningStats { total_learned: 2, recently_learned: 2, needs_review: 1 });

    clock.advance(Duration::days(4));
    let stats = progress.get_stats().await;
    assert_eq!(stats, LearningStats { total_learned: 2, recently_learned: 1, needs_review: 2 });

    // reviewing brings a word back out of the review queue
    progress.mark_learned("candid").await.unwrap();
    let stats = progress.get_stats().await;
    assert_eq!(stats, LearningStats { total_learned: 2, recently_learned: 1, needs_review: 1 });
}

#[tokio::test]
async fn test_entries_without_review_fields() {
    let (progress, store, _) = progress_store();
    store
        .set(LEARNED_WORDS_KEY, r#"{"keen": {"timestamp": 1700000000000}}"#)
        .await
        .unwrap();

    let entry = progress.entry("keen").await.unwrap();
    assert_eq!(entry.last_reviewed_timestamp, 1_700_000_000_000);
    assert_eq!(entry.times_reviewed_correctly, 0);

    let updated = progress.mark_learned("keen").await.unwrap();
    assert_eq!(updated.times_reviewed_correctly, 1);
    assert_eq!(updated.learned_at_timestamp, 1_700_000_000_000);
}

#[tokio::test]
async fn test_stored_layout() {
    let (progress, store, clock) = progress_store();
    progress.mark_learned("Humble").await.unwrap();

    let raw = store.get(LEARNED_WORDS_KEY).await.unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let now = clock.now_millis();
    assert_eq!(json, serde_json::json!({
        "humble": {"timestamp": now, "lastReviewed": now, "timesCorrect": 1}
    }));
}

#[tokio::test]
async fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let clock = friday_clock();

    let progress = LearningProgressStore::new(Arc::new(FileStore::new(dir.path())), clock.clone(), Metrics::new());
    progress.mark_learned("keen").await.unwrap();
    progress.mark_learned("humble").await.unwrap();

    let reopened = LearningProgressStore::new(Arc::new(FileStore::new(dir.path())), clock, Metrics::new());
    let words: Vec<String> = reopened.learned_words().await.into_keys().collect();
    assert_eq!(words, vec!["humble", "keen"]);

    reopened.clear().await;
    assert!(!dir.path().join("learned_words.json").exists());
    assert!(reopened.learned_words().await.is_empty());
}
