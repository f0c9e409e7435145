use std::sync::atomic::{AtomicU64, AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use parking_lot::RwLock;

/// Circuit breaker guarding the thesaurus endpoint.
/// Opens after `failure_threshold` consecutive failures and lets a trial call
/// through once `timeout` has elapsed.
#[derive(Clone)]
pub struct CircuitBreaker {
    failures: Arc<AtomicU64>,
    last_failure: Arc<RwLock<Option<Instant>>>,
    /// true = open (calls rejected)
    is_open: Arc<AtomicBool>,
    timeout: Duration,
    failure_threshold: u64,
}

impl CircuitBreaker {
    pub fn new(timeout: Duration, failure_threshold: u64) -> Self {
        CircuitBreaker {
            failures: Arc::new(AtomicU64::new(0)),
            last_failure: Arc::new(RwLock::new(None)),
            is_open: Arc::new(AtomicBool::new(false)),
            timeout,
            failure_threshold: failure_threshold.max(1),
        }
    }

    /// Check if circuit is open (should not attempt call)
    pub fn is_open(&self) -> bool {
        if !self.is_open.load(Ordering::Relaxed) {
            return false;
        }

        let last_failure = self.last_failure.read();
        if let Some(time) = *last_failure {
            if time.elapsed() >= self.timeout {
                // half-open: allow one attempt
                self.is_open.store(false, Ordering::Relaxed);
                self.failures.store(0, Ordering::Relaxed);
                return false;
            }
        }
        true
    }

    pub fn record_success(&self) {
        self.failures.store(0, Ordering::Relaxed);
        self.is_open.store(false, Ordering::Relaxed);
        *self.last_failure.write() = None;
    }

    pub fn record_failure(&self) {
        let failures = self.failures.fetch_add(1, Ordering::Relaxed) + 1;
        *self.last_failure.write() = Some(Instant::now());

        if failures >= self.failure_threshold {
            if !self.is_open.swap(true, Ordering::Relaxed) {
                tracing::warn!(failures = failures, "Thesaurus circuit opened");
            }
        }
    }

    pub fn failure_count(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }
}

/// Exponential backoff calculator
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    initial_delay_ms: u64,
    max_delay_ms: u64,
    multiplier: f64,
}

impl ExponentialBackoff {
    pub fn new(initial_delay_ms: u64, max_delay_ms: u64) -> Self {
        ExponentialBackoff {
            initial_delay_ms,
            max_delay_ms,
            multiplier: 2.0,
        }
    }

    /// Delay before retrying after attempt number `attempt` (0-indexed)
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = (self.initial_delay_ms as f64 * self.multiplier.powi(attempt as i32)) as u64;
        Duration::from_millis(delay.min(self.max_delay_ms))
    }
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self::new(1000, 10_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circuit_breaker_initial_state() {
        let cb = CircuitBreaker::new(Duration::from_secs(60), 3);
        assert!(!cb.is_open());
        assert_eq!(cb.failure_count(), 0);
    }

    #[test]
    fn test_circuit_breaker_opens_after_threshold() {
        let cb = CircuitBreaker::new(Duration::from_secs(60), 3);

        cb.record_failure();
        assert!(!cb.is_open());

        cb.record_failure();
        assert!(!cb.is_open());

        cb.record_failure();
        assert!(cb.is_open());
    }

    #[test]
    fn test_circuit_breaker_resets_on_success() {
        let cb = CircuitBreaker::new(Duration::from_secs(60), 3);

        cb.record_failure();
        cb.record_failure();
        cb.record_success();

        assert!(!cb.is_open());
        assert_eq!(cb.failure_count(), 0);
    }

    #[test]
    fn test_circuit_breaker_half_opens_after_timeout() {
        let cb = CircuitBreaker::new(Duration::ZERO, 1);
        cb.record_failure();
        assert!(!cb.is_open());
        assert_eq!(cb.failure_count(), 0);
    }

    #[test]
    fn test_exponential_backoff() {
        let backoff = ExponentialBackoff::new(1000, 10_000);

        assert_eq!(backoff.delay_for_attempt(0), Duration::from_millis(1000));
        assert_eq!(backoff.delay_for_attempt(1), Duration::from_millis(2000));
        assert_eq!(backoff.delay_for_attempt(2), Duration::from_millis(4000));
        assert_eq!(backoff.delay_for_attempt(3), Duration::from_millis(8000));

        // capped
        assert_eq!(backoff.delay_for_attempt(10), Duration::from_millis(10_000));
    }
}
