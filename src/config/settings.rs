use anyhow::Context;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "lexiquiz.toml";
pub const API_KEY_ENV: &str = "MERRIAM_WEBSTER_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub quiz: QuizConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub request_timeout_secs: u64,
    pub retry_attempts: u32,
    pub backoff_initial_ms: u64,
    pub backoff_max_ms: u64,
    pub breaker_failure_threshold: u64,
    pub breaker_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: "https://www.dictionaryapi.com/api/v3/references/thesaurus/json".to_string(),
            api_key: String::new(),
            request_timeout_secs: 10,
            retry_attempts: 3,
            backoff_initial_ms: 1000,
            backoff_max_ms: 10_000,
            breaker_failure_threshold: 5,
            breaker_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QuizConfig {
    pub question_count: usize,
    pub max_attempts_per_question: usize,
    /// Word list the questions are drawn from; distractors come from any tier
    pub tier: String,
}

impl Default for QuizConfig {
    fn default() -> Self {
        QuizConfig {
            question_count: 10,
            max_attempts_per_question: 40,
            tier: "intermediate".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Overrides the platform data directory
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolved_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| super::data_dir().join("store"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl AppConfig {
    /// Parse a TOML document; missing sections and fields take their defaults
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        toml::from_str::<AppConfig>(content).context("Failed to parse configuration")
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let mut config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file {:?}", path))?;
        config.apply_env();
        Ok(config)
    }

    /// Load from the platform config path, falling back to defaults
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            tracing::debug!(path = ?path, "No config file, using defaults");
            let mut config = AppConfig::default();
            config.apply_env();
            return config;
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!(path = ?path, "Loaded configuration");
                config
            }
            Err(e) => {
                tracing::warn!(path = ?path, error = %format!("{:#}", e), "Failed to load config, using defaults");
                let mut config = AppConfig::default();
                config.apply_env();
                config
            }
        }
    }

    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.api.api_key = key.trim().to_string();
            }
        }
    }
}

pub fn config_path() -> PathBuf {
    super::data_dir().join(CONFIG_FILE)
}

lazy_static! {
    static ref APP_CONFIG: AppConfig = AppConfig::load();
}

/// Get the cached configuration (loaded once on first use)
pub fn get_config() -> &'static AppConfig {
    &APP_CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [quiz]
            question_count = 5

            [logging]
            json = false
            "#,
        )
        .unwrap();
        assert_eq!(config.quiz.question_count, 5);
        assert_eq!(config.quiz.max_attempts_per_question, 40);
        assert_eq!(config.quiz.tier, "intermediate");
        assert!(!config.logging.json);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.api, ApiConfig::default());
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_invalid_document_is_error() {
        let err = AppConfig::from_toml_str("[quiz]\nquestion_count = \"ten\"").unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse configuration"));
    }

    #[test]
    fn test_storage_override() {
        let config = AppConfig::from_toml_str("[storage]\ndata_dir = \"/tmp/lexiquiz\"").unwrap();
        assert_eq!(config.storage.resolved_dir(), PathBuf::from("/tmp/lexiquiz"));
    }
}
