use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use crate::clock::{weekday_index, Clock};
use crate::error::VocabError;
use crate::metrics::Metrics;
use crate::storage::{decode_json, save_json, KeyValueStore};

pub const QUIZ_STATS_KEY: &str = "@quiz_stats";
pub const LAST_QUIZ_DATE_KEY: &str = "@last_quiz_date";

const DATE_FORMAT: &str = "%Y-%m-%d";
/// `Fri Oct 16 2026`, written by earlier app versions
const LEGACY_DATE_FORMAT: &str = "%a %b %d %Y";

/// Aggregate quiz performance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizStatistics {
    pub quizzes_taken: u32,
    /// Sum of per-quiz percentage scores
    #[serde(rename = "totalScore", alias = "totalScoreSum")]
    pub total_score_sum: u64,
    pub average_score: u32,
    /// Consecutive calendar days with at least one quiz
    pub streak: u32,
    /// Latest percentage per weekday, 0 = Sunday
    pub weekly_progress: [u32; 7],
    /// Stored under its own key
    #[serde(skip)]
    pub last_quiz_date: Option<NaiveDate>,
}

impl QuizStatistics {
    /// `round(total_score_sum / quizzes_taken)`, 0 before the first quiz
    pub fn derived_average(&self) -> u32 {
        if self.quizzes_taken == 0 {
            0
        } else {
            (self.total_score_sum as f64 / self.quizzes_taken as f64).round() as u32
        }
    }

    /// Fold one finished quiz into the aggregates
    pub fn apply_result(&mut self, percentage: u32, today: NaiveDate) {
        self.streak = next_streak(self.streak, self.last_quiz_date, today);
        self.last_quiz_date = Some(today);
        self.quizzes_taken += 1;
        self.total_score_sum += u64::from(percentage);
        self.average_score = self.derived_average();
        self.weekly_progress[weekday_index(today)] = percentage;
    }
}

/// `round(100 * score / total)`; score is capped at `total`
pub fn percentage(score: u32, total_questions: u32) -> u32 {
    if total_questions == 0 {
        tracing::warn!(score = score, "Quiz result with zero questions, scoring 0%");
        return 0;
    }
    let score = score.min(total_questions);
    (f64::from(score) * 100.0 / f64::from(total_questions)).round() as u32
}

/// Streak after completing a quiz on `today`.
///
/// First quiz ever starts at 1, the next calendar day extends it, a second
/// quiz on the same day leaves it alone and any longer gap restarts it.
pub fn next_streak(current: u32, last_quiz_date: Option<NaiveDate>, today: NaiveDate) -> u32 {
    let Some(last) = last_quiz_date else {
        return 1;
    };
    match (today - last).num_days() {
        0 => current.max(1),
        1 => current + 1,
        _ => 1,
    }
}

pub fn parse_quiz_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim().trim_matches('"');
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(raw, LEGACY_DATE_FORMAT))
        .ok()
}

/// Quiz statistics persisted in the key-value store.
///
/// Each call reads the record, applies the change and writes it back; there
/// is no lock between the read and the write, so two overlapping `record`
/// calls can lose one result. Storage failures are logged and degrade to the
/// zero-state record rather than failing the caller.
pub struct QuizStatsStore<S: KeyValueStore> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    metrics: Metrics,
}

impl<S: KeyValueStore> QuizStatsStore<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>, metrics: Metrics) -> Self {
        QuizStatsStore { store, clock, metrics }
    }

    /// Current statistics; the zero-state record is written on first access
    pub async fn get_stats(&self) -> QuizStatistics {
        match self.load().await {
            Ok(stats) => stats,
            Err(e) => {
                self.storage_failed("load quiz statistics", &e);
                QuizStatistics::default()
            }
        }
    }

    /// Record a finished quiz and return the updated statistics.
    ///
    /// When the stored record cannot be read the result is computed from the
    /// zero state and returned without being saved.
    pub async fn record(&self, score: u32, total_questions: u32) -> QuizStatistics {
        let (mut stats, writable) = match self.load().await {
            Ok(stats) => (stats, true),
            Err(e) => {
                self.storage_failed("load quiz statistics", &e);
                (QuizStatistics::default(), false)
            }
        };
        let today = self.clock.today();
        let previous_date = stats.last_quiz_date;

        stats.apply_result(percentage(score, total_questions), today);

        if writable {
            if previous_date != Some(today) {
                let marker = today.format(DATE_FORMAT).to_string();
                if let Err(e) = self.store.set(LAST_QUIZ_DATE_KEY, &marker).await {
                    self.storage_failed("save last quiz date", &e);
                }
            }
            self.persist(&stats).await;
        }

        tracing::info!(
            score = score,
            total_questions = total_questions,
            quizzes_taken = stats.quizzes_taken,
            average_score = stats.average_score,
            streak = stats.streak,
            saved = writable,
            "Quiz result recorded"
        );
        stats
    }

    /// Back to the zero-state record; the last quiz date is forgotten
    pub async fn reset(&self) -> QuizStatistics {
        let initial = QuizStatistics::default();
        self.persist(&initial).await;
        if let Err(e) = self.store.remove(LAST_QUIZ_DATE_KEY).await {
            self.storage_failed("remove last quiz date", &e);
        }
        tracing::info!("Quiz statistics reset");
        initial
    }

    pub async fn streak(&self) -> u32 {
        self.get_stats().await.streak
    }

    /// Stored statistics. Only a failed read is an error; an undecodable
    /// record is logged and read as the zero state.
    async fn load(&self) -> Result<QuizStatistics, VocabError> {
        let mut stats = match self.store.get(QUIZ_STATS_KEY).await? {
            Some(raw) => match decode_json::<QuizStatistics>(QUIZ_STATS_KEY, &raw) {
                Ok(mut stats) => {
                    stats.average_score = stats.derived_average();
                    stats
                }
                Err(e) => {
                    self.storage_failed("decode quiz statistics", &e);
                    QuizStatistics::default()
                }
            },
            None => {
                let initial = QuizStatistics::default();
                self.persist(&initial).await;
                initial
            }
        };
        stats.last_quiz_date = self.load_last_quiz_date().await;
        Ok(stats)
    }

    async fn load_last_quiz_date(&self) -> Option<NaiveDate> {
        match self.store.get(LAST_QUIZ_DATE_KEY).await {
            Ok(Some(raw)) => {
                let parsed = parse_quiz_date(&raw);
                if parsed.is_none() {
                    tracing::warn!(value = %raw, "Unreadable last quiz date, ignoring");
                }
                parsed
            }
            Ok(None) => None,
            Err(e) => {
                self.storage_failed("load last quiz date", &e);
                None
            }
        }
    }

    async fn persist(&self, stats: &QuizStatistics) {
        if let Err(e) = save_json(self.store.as_ref(), QUIZ_STATS_KEY, stats).await {
            self.storage_failed("save quiz statistics", &e);
        }
    }

    fn storage_failed(&self, operation: &str, error: &VocabError) {
        self.metrics.record_storage_error();
        tracing::warn!(operation = operation, error = %error, "Storage access failed, continuing with defaults");
    }
}
