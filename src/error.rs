use serde::{Serialize, Deserialize};
use std::fmt;

/// Failure categories surfaced by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ErrorKind {
    /// Empty, non-alphabetic or otherwise unusable word input.
    /// Word Source recovers from this by substituting a random word.
    #[error("invalid word input")]
    InvalidWordInput,
    #[error("word fetch failed")]
    WordFetchFailed,
    /// The thesaurus answered with spelling suggestions instead of an entry.
    #[error("word not found")]
    WordNotFound,
    #[error("malformed response")]
    MalformedResponse,
    #[error("quiz generation exhausted")]
    QuizGenerationExhausted,
    #[error("quiz session finished")]
    QuizSessionFinished,
    #[error("storage access failed")]
    StorageAccessFailed,
    #[error("configuration error")]
    Config,
}

/// Unified error type for the crate.
/// Every fallible public operation returns `Result<T, VocabError>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabError {
    pub kind: ErrorKind,
    pub message: String,
    pub stage: String,
    pub word: Option<String>,
    pub retryable: bool,
    pub context: Option<String>,
    pub source: Option<String>,
}

impl VocabError {
    /// Create a new error with kind, message and stage
    pub fn new<S: Into<String>>(kind: ErrorKind, message: S, stage: &'static str) -> Self {
        VocabError {
            kind,
            message: message.into(),
            stage: stage.to_string(),
            word: None,
            retryable: false,
            context: None,
            source: None,
        }
    }

    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorKind::InvalidWordInput, message, "validate")
    }

    pub fn fetch_failed<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorKind::WordFetchFailed, message, "fetch")
    }

    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorKind::MalformedResponse, message, "normalize")
    }

    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorKind::StorageAccessFailed, message, "storage")
    }

    /// Attach the word the failing operation was working on
    pub fn with_word<S: Into<String>>(mut self, word: S) -> Self {
        self.word = Some(word.into());
        self
    }

    /// Mark whether repeating the same request may succeed
    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }

    /// Add additional context information
    pub fn with_context<S: Into<String>>(mut self, context: S) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add source error information
    pub fn with_source<S: Into<String>>(mut self, source: S) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for VocabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.stage, self.kind, self.message)?;
        if let Some(ref word) = self.word {
            write!(f, " (word: {})", word)?;
        }
        if let Some(ref context) = self.context {
            write!(f, " (context: {})", context)?;
        }
        if let Some(ref source) = self.source {
            write!(f, " (source: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for VocabError {}

impl From<anyhow::Error> for VocabError {
    fn from(err: anyhow::Error) -> Self {
        VocabError::new(ErrorKind::Config, format!("{:#}", err), "config")
            .with_source("anyhow")
    }
}

impl From<std::io::Error> for VocabError {
    fn from(err: std::io::Error) -> Self {
        VocabError::storage(format!("I/O error: {}", err))
            .with_source("std::io")
    }
}

impl From<serde_json::Error> for VocabError {
    fn from(err: serde_json::Error) -> Self {
        VocabError::malformed(format!("JSON error: {}", err))
            .with_source("serde_json")
    }
}

impl From<reqwest::Error> for VocabError {
    fn from(err: reqwest::Error) -> Self {
        let retryable = err.is_timeout() || err.is_connect() || err.is_request();
        VocabError::fetch_failed(format!("Network error: {}", err))
            .with_retryable(retryable)
            .with_source("reqwest")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = VocabError::new(ErrorKind::WordFetchFailed, "Test error", "test_stage");
        assert_eq!(error.message, "Test error");
        assert_eq!(error.stage, "test_stage");
        assert!(error.is(ErrorKind::WordFetchFailed));
        assert!(!error.retryable);
    }

    #[test]
    fn test_error_with_context() {
        let error = VocabError::fetch_failed("Test error")
            .with_context("Additional context");
        assert_eq!(error.context.as_deref(), Some("Additional context"));
    }

    #[test]
    fn test_error_with_word() {
        let error = VocabError::malformed("Missing id").with_word("keen");
        assert_eq!(error.word.as_deref(), Some("keen"));
        assert_eq!(error.kind, ErrorKind::MalformedResponse);
    }

    #[test]
    fn test_error_display() {
        let error = VocabError::storage("disk full")
            .with_context("key: @quiz_stats")
            .with_word("keen");
        let display = format!("{}", error);
        assert!(display.contains("storage"));
        assert!(display.contains("disk full"));
        assert!(display.contains("storage access failed"));
        assert!(display.contains("@quiz_stats"));
    }

    #[test]
    fn test_json_error_maps_to_malformed_response() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: VocabError = err.into();
        assert_eq!(error.kind, ErrorKind::MalformedResponse);
        assert_eq!(error.source.as_deref(), Some("serde_json"));
    }

    #[test]
    fn test_io_error_maps_to_storage_failure() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: VocabError = err.into();
        assert_eq!(error.kind, ErrorKind::StorageAccessFailed);
    }

    #[test]
    fn test_anyhow_error_maps_to_config() {
        let error: VocabError = anyhow::anyhow!("bad toml").into();
        assert_eq!(error.kind, ErrorKind::Config);
        assert!(error.message.contains("bad toml"));
    }
}
