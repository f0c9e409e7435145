use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tokio::time::{sleep, Duration};
use crate::circuit_breaker::{CircuitBreaker, ExponentialBackoff};
use crate::config::settings::ApiConfig;
use crate::error::{ErrorKind, VocabError};
use crate::perf;
use super::ThesaurusApi;

/// HTTP client for the Merriam-Webster collegiate thesaurus
#[derive(Clone)]
pub struct MerriamWebsterClient {
    http: Client,
    base_url: String,
    api_key: String,
    retry_attempts: u32,
    backoff: ExponentialBackoff,
    breaker: CircuitBreaker,
}

impl MerriamWebsterClient {
    pub fn new(config: &ApiConfig) -> Result<Self, VocabError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .tcp_keepalive(Duration::from_secs(30))
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| VocabError::new(
                ErrorKind::Config,
                format!("Failed to create HTTP client: {}", e),
                "startup",
            ))?;

        Ok(MerriamWebsterClient {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            retry_attempts: config.retry_attempts.max(1),
            backoff: ExponentialBackoff::new(config.backoff_initial_ms, config.backoff_max_ms),
            breaker: CircuitBreaker::new(
                Duration::from_secs(config.breaker_timeout_secs),
                config.breaker_failure_threshold,
            ),
        })
    }

    /// `{base_url}/{word}?key={api_key}`
    pub fn url_for(&self, word: &str) -> Result<Url, VocabError> {
        if self.api_key.trim().is_empty() {
            return Err(VocabError::fetch_failed("API key is not configured")
                .with_context(format!("set {} or api.api_key", crate::config::settings::API_KEY_ENV)));
        }

        let mut url = Url::parse(&self.base_url).map_err(|e| VocabError::new(
            ErrorKind::Config,
            format!("Invalid thesaurus base URL: {}", e),
            "fetch",
        ))?;
        url.path_segments_mut()
            .map_err(|_| VocabError::new(ErrorKind::Config, "Thesaurus base URL cannot have a path", "fetch"))?
            .pop_if_empty()
            .push(word.trim());
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    async fn fetch_once(&self, word: &str) -> Result<Value, VocabError> {
        let url = self.url_for(word)?;
        let start = std::time::Instant::now();

        let response = self.http
            .get(url)
            .send()
            .await
            .map_err(|e| VocabError::from(e).with_word(word))?;

        let status = response.status();
        perf::log_perf_with_context("thesaurus_request", start.elapsed().as_millis() as u64, word);
        if !status.is_success() {
            return Err(classify_status(status).with_word(word));
        }

        let body = response
            .text()
            .await
            .map_err(|e| VocabError::from(e).with_word(word))?;
        serde_json::from_str::<Value>(&body).map_err(|e| {
            VocabError::malformed(format!("Response is not JSON: {}", e))
                .with_word(word)
                .with_source("serde_json")
        })
    }
}

/// Map a non-success HTTP status to an error
pub fn classify_status(status: StatusCode) -> VocabError {
    match status {
        StatusCode::NOT_FOUND => {
            VocabError::new(ErrorKind::WordNotFound, "Word not found", "fetch")
        }
        StatusCode::FORBIDDEN | StatusCode::UNAUTHORIZED => {
            VocabError::fetch_failed("Invalid API key")
        }
        StatusCode::TOO_MANY_REQUESTS => {
            VocabError::fetch_failed("Rate limit exceeded").with_retryable(true)
        }
        s if s.is_server_error() => {
            VocabError::fetch_failed(format!("Thesaurus server error: {}", s)).with_retryable(true)
        }
        s => VocabError::fetch_failed(format!("Unexpected status: {}", s)),
    }
}

impl ThesaurusApi for MerriamWebsterClient {
    /// Request-level retry: retryable failures are attempted again with
    /// exponential backoff, up to `retry_attempts` calls in total.
    async fn fetch_entries(&self, word: &str) -> Result<Value, VocabError> {
        let _perf = perf::PerfTimer::new("thesaurus_fetch");

        for attempt in 0..self.retry_attempts {
            if self.breaker.is_open() {
                return Err(VocabError::fetch_failed("Thesaurus temporarily unavailable")
                    .with_word(word)
                    .with_context("circuit open"));
            }

            match self.fetch_once(word).await {
                Ok(payload) => {
                    self.breaker.record_success();
                    return Ok(payload);
                }
                Err(e) if e.retryable => {
                    self.breaker.record_failure();
                    if attempt + 1 >= self.retry_attempts {
                        return Err(e);
                    }
                    let delay = self.backoff.delay_for_attempt(attempt);
                    tracing::warn!(
                        word = %word,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Thesaurus request failed, retrying"
                    );
                    sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }

        Err(VocabError::fetch_failed("No request attempts configured").with_word(word))
    }
}
