//! Retry with exponential backoff for transient E-utilities failures.
//!
//! Only network errors, 5xx responses and rate limiting are retried. Parse
//! and client errors fail immediately.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

use crate::sources::SourceError;

/// Configuration for retry behavior
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first one
    pub max_attempts: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Upper bound for any single delay
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// A policy that never retries
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Delay before retry number `retry` (1-based)
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = self.backoff_multiplier.powi(retry.saturating_sub(1) as i32);
        let secs = (self.initial_delay.as_secs_f64() * factor).min(self.max_delay.as_secs_f64());
        Duration::from_secs_f64(secs.max(0.0))
    }
}

/// Transient errors that should trigger a retry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransientError {
    /// Network connectivity issues or 5xx
    Network,
    /// Too many requests (429)
    RateLimit,
}

impl TransientError {
    /// Classify a [`SourceError`]; `None` means permanent
    pub fn from_source_error(err: &SourceError) -> Option<Self> {
        match err {
            SourceError::Network(_) => Some(TransientError::Network),
            SourceError::RateLimit => Some(TransientError::RateLimit),
            _ => None,
        }
    }

    /// Minimum wait for this kind of failure. NCBI rate windows are one second.
    pub fn minimum_delay(&self) -> Duration {
        match self {
            TransientError::Network => Duration::ZERO,
            TransientError::RateLimit => Duration::from_secs(1),
        }
    }
}

/// Execute an async operation with retry logic
pub async fn with_retry<T, F, Fut>(config: RetryConfig, mut operation: F) -> Result<T, SourceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SourceError>>,
{
    let mut attempt = 0u32;

    loop {
        attempt += 1;

        let error = match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!("Request succeeded on attempt {}", attempt);
                }
                return Ok(value);
            }
            Err(e) => e,
        };

        let Some(transient) = TransientError::from_source_error(&error) else {
            return Err(error);
        };

        if attempt >= config.max_attempts {
            tracing::warn!("Request failed after {} attempts: {}", attempt, error);
            return Err(error);
        }

        let delay = config.delay_for(attempt).max(transient.minimum_delay());
        tracing::debug!(
            "Transient error on attempt {}: {}, retrying in {:?}",
            attempt,
            error,
            delay
        );
        sleep(delay).await;
    }
}
