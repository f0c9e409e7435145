pub mod analytics;
pub mod circuit_breaker;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod perf;
pub mod progress;
pub mod quiz;
pub mod routes;
pub mod state;
pub mod storage;
pub mod thesaurus;
pub mod words;

pub use error::{ErrorKind, VocabError};
pub use state::app::AppState;

use std::sync::Arc;
use clock::SystemClock;
use config::settings::get_config;
use storage::FileStore;
use thesaurus::MerriamWebsterClient;

/// Application state wired to the real thesaurus and on-disk storage.
/// Loads the configuration and installs logging first.
pub fn bootstrap() -> Result<AppState<MerriamWebsterClient, FileStore>, VocabError> {
    let config = get_config();

    if let Err(e) = logging::init_logging(&config.logging) {
        // Another subscriber was installed by the host
        tracing::warn!(error = %e, "Logging already initialized");
    }
    tracing::info!("lexiquiz core starting");

    let client = MerriamWebsterClient::new(&config.api)?;
    if config.api.api_key.is_empty() {
        tracing::warn!(env = config::settings::API_KEY_ENV, "No thesaurus API key configured, lookups will fail");
    }

    let store = FileStore::new(config.storage.resolved_dir());
    tracing::info!(dir = ?store.dir(), "Using data directory");

    Ok(AppState::new(
        client,
        Arc::new(store),
        Arc::new(SystemClock),
        config,
    ))
}
