use crate::config::settings::LoggingConfig;
use crate::error::{ErrorKind, VocabError};

/// Initialize structured logging with tracing.
/// Call once at startup; a second call reports an error instead of panicking.
pub fn init_logging(config: &LoggingConfig) -> Result<(), VocabError> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        tracing::subscriber::set_global_default(
            registry.with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .json(),
            ),
        )
    } else {
        tracing::subscriber::set_global_default(
            registry.with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .pretty(),
            ),
        )
    };

    result.map_err(|e| VocabError::new(
        ErrorKind::Config,
        format!("Failed to set global tracing subscriber: {}", e),
        "logging",
    ))?;

    tracing::info!(level = %config.level, json = config.json, "Structured logging initialized");
    Ok(())
}
