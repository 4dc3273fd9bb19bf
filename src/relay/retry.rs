//! Retry logic utilities for relay operations
//!
//! Capped exponential backoff around async relay calls. Only errors that
//! report themselves as transient are retried.

use crate::config::RelayConfig;
use crate::errors::{RelayError, RelayResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Calculate next backoff duration using exponential backoff with a maximum cap
///
/// `new_backoff = min(current_backoff * multiplier, max_backoff)`
///
/// # Example
/// ```
/// use std::time::Duration;
/// use relay_offers::relay::calculate_next_backoff;
///
/// let backoff = Duration::from_millis(100);
/// let next = calculate_next_backoff(backoff, 2.0, 30);
/// assert_eq!(next, Duration::from_millis(200));
/// ```
pub fn calculate_next_backoff(
    current_backoff: Duration,
    multiplier: f64,
    max_backoff_seconds: u64,
) -> Duration {
    Duration::from_millis((current_backoff.as_millis() as f64 * multiplier) as u64)
        .min(Duration::from_secs(max_backoff_seconds))
}

/// Backoff parameters for one client
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: usize,
    pub initial_backoff: Duration,
    pub multiplier: f64,
    pub max_backoff_seconds: u64,
}

impl From<&RelayConfig> for RetryPolicy {
    fn from(config: &RelayConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_backoff: Duration::from_millis(config.initial_backoff_ms),
            multiplier: config.backoff_multiplier,
            max_backoff_seconds: config.max_backoff_seconds,
        }
    }
}

/// Run `attempt` until it succeeds, fails permanently, or retries run out
///
/// Makes at most `max_retries + 1` calls. Exhausting retries on a transient
/// error yields `RelayError::MaxRetriesExceeded`.
pub async fn retry_with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    mut attempt: F,
) -> RelayResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = RelayResult<T>>,
{
    let mut backoff = policy.initial_backoff;
    let mut retries = 0usize;

    loop {
        match attempt().await {
            Ok(value) => {
                if retries > 0 {
                    debug!("{} succeeded after {} retries", operation, retries);
                }
                return Ok(value);
            }
            Err(e) if e.is_transient() => {
                if retries >= policy.max_retries {
                    warn!("{} failed after {} retries: {}", operation, retries, e);
                    return Err(RelayError::MaxRetriesExceeded {
                        operation: operation.to_string(),
                    });
                }
                retries += 1;
                warn!(
                    "{} failed (attempt {}), retrying in {:?}: {}",
                    operation, retries, backoff, e
                );
                sleep(backoff).await;
                backoff =
                    calculate_next_backoff(backoff, policy.multiplier, policy.max_backoff_seconds);
            }
            Err(e) => return Err(e),
        }
    }
}
