//! Retry policy for transient market failures.

use rand::RngExt;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// A failed request that is worth trying again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("rate limited (429)")]
    RateLimited,
    #[error("HTTP {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid JSON: {0}")]
    Decode(String),
    #[error("no data (success=false)")]
    Unsuccessful,
}

/// How long to wait between attempts and when to give up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Delay after a transient failure in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Delay after HTTP 429 in milliseconds
    #[serde(default = "default_rate_limit_delay_ms")]
    pub rate_limit_delay_ms: u64,

    /// Random extra delay (0 to this value)
    #[serde(default)]
    pub jitter_ms: u64,

    /// Give up after this many attempts; retry forever when absent
    #[serde(default)]
    pub max_attempts: Option<u32>,
}

/// Returns `base_ms` plus a random 0 to `jitter_ms` milliseconds.
pub fn jittered(base_ms: u64, jitter_ms: u64) -> Duration {
    let jitter = if jitter_ms > 0 { rand::rng().random_range(0..=jitter_ms) } else { 0 };
    Duration::from_millis(base_ms + jitter)
}

fn default_delay_ms() -> u64 {
    2000
}

fn default_rate_limit_delay_ms() -> u64 {
    10_000
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            rate_limit_delay_ms: default_rate_limit_delay_ms(),
            jitter_ms: 0,
            max_attempts: None,
        }
    }
}

impl RetryPolicy {
    /// A policy with no delays that gives up after `max_attempts` tries.
    pub fn immediate(max_attempts: u32) -> Self {
        Self { delay_ms: 0, rate_limit_delay_ms: 0, jitter_ms: 0, max_attempts: Some(max_attempts) }
    }

    /// Returns the base delay for an error in milliseconds, before jitter.
    pub fn base_delay_ms(&self, error: &FetchError) -> u64 {
        match error {
            FetchError::RateLimited => self.rate_limit_delay_ms,
            _ => self.delay_ms,
        }
    }

    /// Returns true if another attempt may follow attempt number `attempt` (1-based).
    pub fn allows_retry(&self, attempt: u32) -> bool {
        self.max_attempts.is_none_or(|max| attempt < max)
    }

    fn delay_for(&self, error: &FetchError) -> Duration {
        jittered(self.base_delay_ms(error), self.jitter_ms)
    }

    /// Runs `op` until it succeeds or the policy is exhausted.
    ///
    /// Returns the last error once `max_attempts` is reached.
    pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> Result<T, FetchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let mut attempt = 1;

        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if !self.allows_retry(attempt) => {
                    warn!("Giving up on {} after {} attempts: {}", label, attempt, err);
                    return Err(err);
                }
                Err(err) => {
                    let delay = self.delay_for(&err);
                    warn!("{} for {}. Retrying in {}ms...", err, label, delay.as_millis());
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    debug!("Attempt {} for {}", attempt + 1, label);
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_ms, 2000);
        assert_eq!(policy.rate_limit_delay_ms, 10_000);
        assert_eq!(policy.jitter_ms, 0);
        assert!(policy.max_attempts.is_none());
        assert!(policy.allows_retry(1_000_000));
    }

    #[test]
    fn test_base_delay_by_error() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.base_delay_ms(&FetchError::RateLimited), 10_000);
        assert_eq!(policy.base_delay_ms(&FetchError::Status(500)), 2000);
        assert_eq!(policy.base_delay_ms(&FetchError::Unsuccessful), 2000);
    }

    #[test]
    fn test_delay_jitter_bounds() {
        let policy = RetryPolicy { delay_ms: 100, rate_limit_delay_ms: 400, jitter_ms: 50, max_attempts: None };
        for _ in 0..100 {
            let delay = policy.delay_for(&FetchError::Status(503));
            assert!(delay >= Duration::from_millis(100));
            assert!(delay <= Duration::from_millis(150));

            let delay = policy.delay_for(&FetchError::RateLimited);
            assert!(delay >= Duration::from_millis(400));
            assert!(delay <= Duration::from_millis(450));
        }
    }

    #[test]
    fn test_delay_without_jitter() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(&FetchError::Network("reset".into())), Duration::from_secs(2));
        assert_eq!(jittered(700, 0), Duration::from_millis(700));
    }

    #[test]
    fn test_bounded_policy() {
        let policy = RetryPolicy::immediate(3);
        assert!(policy.allows_retry(1));
        assert!(policy.allows_retry(2));
        assert!(!policy.allows_retry(3));
    }

    #[test]
    fn test_policy_from_toml() {
        let policy: RetryPolicy = toml::from_str("max_attempts = 5\njitter_ms = 250").unwrap();
        assert_eq!(policy.max_attempts, Some(5));
        assert_eq!(policy.jitter_ms, 250);
        assert_eq!(policy.delay_ms, 2000);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(FetchError::RateLimited.to_string(), "rate limited (429)");
        assert_eq!(FetchError::Status(502).to_string(), "HTTP 502");
        assert!(FetchError::Decode("eof".into()).to_string().contains("invalid JSON"));
    }

    #[tokio::test]
    async fn test_run_succeeds_after_failures() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let policy = RetryPolicy::immediate(5);

        let result = policy
            .run("item", move || async move {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 3 {
                    Err(FetchError::RateLimited)
                } else {
                    Ok(n)
                }
            })
            .await;

        assert_eq!(result, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_run_gives_up() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let policy = RetryPolicy::immediate(2);

        let result: Result<(), FetchError> = policy
            .run("item", move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(FetchError::Status(500))
            })
            .await;

        assert_eq!(result, Err(FetchError::Status(500)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
