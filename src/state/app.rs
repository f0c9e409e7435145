use std::sync::Arc;
use parking_lot::Mutex;
use crate::analytics::{compute_profile_summary, ProfileSummary};
use crate::clock::Clock;
use crate::config::settings::AppConfig;
use crate::metrics::Metrics;
use crate::progress::LearningProgressStore;
use crate::quiz::{QuizGenerator, QuizStatsStore};
use crate::state::session::QuizSession;
use crate::storage::KeyValueStore;
use crate::thesaurus::ThesaurusApi;
use crate::words::WordSource;

/// Application-wide state container.
/// Services share one key-value store, one clock and one set of counters,
/// and are passed explicitly to the command functions.
pub struct AppState<A: ThesaurusApi, S: KeyValueStore> {
    pub words: Arc<WordSource<A>>,
    pub quiz: QuizGenerator<A>,
    pub progress: LearningProgressStore<S>,
    pub quiz_stats: QuizStatsStore<S>,
    pub metrics: Metrics,
    pub clock: Arc<dyn Clock>,
    /// Quiz currently being answered, if any
    session: Mutex<Option<QuizSession>>,
}

impl<A: ThesaurusApi, S: KeyValueStore> AppState<A, S> {
    pub fn new(api: A, store: Arc<S>, clock: Arc<dyn Clock>, config: &AppConfig) -> Self {
        let metrics = Metrics::new();
        let words = Arc::new(WordSource::new(api, metrics.clone()));
        AppState {
            quiz: QuizGenerator::new(words.clone(), &config.quiz, metrics.clone()),
            progress: LearningProgressStore::new(store.clone(), clock.clone(), metrics.clone()),
            quiz_stats: QuizStatsStore::new(store, clock.clone(), metrics.clone()),
            words,
            metrics,
            clock,
            session: Mutex::new(None),
        }
    }

    /// Replace any running quiz
    pub fn set_session(&self, session: QuizSession) {
        *self.session.lock() = Some(session);
    }

    pub fn take_session(&self) -> Option<QuizSession> {
        self.session.lock().take()
    }

    /// Run `f` against the running quiz, if there is one
    pub fn with_session<T, F>(&self, f: F) -> Option<T>
    where
        F: FnOnce(&mut QuizSession) -> T,
    {
        self.session.lock().as_mut().map(f)
    }

    pub async fn profile_summary(&self) -> ProfileSummary {
        let learning = self.progress.get_stats().await;
        let quiz = self.quiz_stats.get_stats().await;
        compute_profile_summary(&learning, &quiz)
    }
}
