use shared::Error;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Exponential backoff settings for RPC calls
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// No retries at all, one attempt per call
    pub fn single_attempt() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Delay before retrying after the given (0-indexed) failed attempt
    pub fn calculate_delay(&self, attempt: u32) -> Duration {
        let scaled = self.initial_delay.as_millis() as f64 * self.backoff_multiplier.powi(attempt as i32);
        Duration::from_millis(scaled as u64).min(self.max_delay)
    }
}

/// Errors that may succeed when the same call is repeated
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

impl Retryable for Error {
    fn is_retryable(&self) -> bool {
        matches!(self, Error::SolanaRpc(_) | Error::ExternalService(_))
    }
}

impl Retryable for String {
    fn is_retryable(&self) -> bool {
        true
    }
}

/// Run `operation` until it succeeds, fails with a non-retryable error, or
/// runs out of attempts. Returns the last error on failure.
pub async fn retry_with_backoff<F, Fut, T, E>(
    operation_name: &str,
    config: &RetryConfig,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Display + Retryable,
{
    let attempts = config.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!("'{}' succeeded on attempt {}/{}", operation_name, attempt + 1, attempts);
                }
                return Ok(result);
            }
            Err(e) if !e.is_retryable() => {
                debug!("'{}' failed with non-retryable error: {}", operation_name, e);
                return Err(e);
            }
            Err(e) => {
                warn!("'{}' failed on attempt {}/{}: {}", operation_name, attempt + 1, attempts, e);

                if attempt + 1 >= attempts {
                    return Err(e);
                }

                let delay = config.calculate_delay(attempt);
                debug!("Retrying '{}' in {:?}", operation_name, delay);
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
