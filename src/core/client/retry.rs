use std::future::Future;
use std::time::Duration;

use crate::core::FbError;

/// Specifies the backoff strategy for retrying failed requests.
#[derive(Clone, Debug)]
pub enum Backoff {
    /// Uses a fixed delay between retries.
    Fixed(Duration),
    /// Waits `attempt * base` before retry number `attempt` (1-based).
    Linear {
        /// The delay unit multiplied by the attempt index.
        base: Duration,
    },
    /// Uses an exponential delay between retries.
    /// The delay is calculated as `base * (factor ^ (attempt - 1))`, capped at `max`.
    Exponential {
        /// The initial backoff duration.
        base: Duration,
        /// The multiplicative factor for each subsequent retry.
        factor: f64,
        /// The maximum duration to wait between retries.
        max: Duration,
    },
}

impl Backoff {
    /// Delay to wait after failed attempt number `attempt` (1-based).
    #[must_use]
    pub fn delay(&self, attempt: u32) -> Duration {
        match self {
            Self::Fixed(d) => *d,
            Self::Linear { base } => base.saturating_mul(attempt),
            Self::Exponential { base, factor, max } => {
                let exp = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
                let secs = base.as_secs_f64() * factor.powi(exp);
                if secs.is_finite() && secs < max.as_secs_f64() {
                    Duration::from_secs_f64(secs)
                } else {
                    *max
                }
            }
        }
    }
}

/// Configuration for the automatic retry mechanism.
#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Enables or disables the retry mechanism. When disabled every call is attempted once.
    pub enabled: bool,
    /// The maximum number of attempts, including the first one.
    pub max_attempts: u32,
    /// The backoff strategy to use between attempts.
    pub backoff: Backoff,
    /// Whether to retry on request timeouts.
    pub retry_on_timeout: bool,
    /// Whether to retry on connection errors.
    pub retry_on_connect: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: 3,
            backoff: Backoff::Linear {
                base: Duration::from_secs(2),
            },
            retry_on_timeout: true,
            retry_on_connect: true,
        }
    }
}

impl RetryConfig {
    /// Whether `err` should be retried under this configuration.
    #[must_use]
    pub fn should_retry(&self, err: &FbError) -> bool {
        match err {
            FbError::Http(e) if e.is_timeout() => self.retry_on_timeout,
            FbError::Http(e) if e.is_connect() => self.retry_on_connect,
            other => other.is_retryable(),
        }
    }

    fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Runs `op` until it succeeds, a non-retryable error occurs, or the attempt budget is spent.
///
/// `op` receives the 1-based attempt index. Exhausting the budget yields
/// [`FbError::RetryExhausted`] wrapping the last failure; non-retryable errors
/// are returned unchanged on the attempt that produced them.
///
/// # Errors
///
/// Returns the non-retryable error, or `RetryExhausted` after the final attempt.
pub async fn with_retry<T, F, Fut>(cfg: &RetryConfig, mut op: F) -> Result<T, FbError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, FbError>>,
{
    if !cfg.enabled {
        return op(1).await;
    }
    let attempts = cfg.attempts();
    let mut attempt = 1u32;
    loop {
        match op(attempt).await {
            Ok(v) => return Ok(v),
            Err(e) if !cfg.should_retry(&e) => return Err(e),
            Err(e) if attempt >= attempts => {
                tracing::warn!(attempts, error = %e, "retry budget exhausted");
                return Err(FbError::RetryExhausted {
                    attempts,
                    last: Box::new(e),
                });
            }
            Err(e) => {
                let wait = cfg.backoff.delay(attempt);
                tracing::warn!(attempt, ?wait, error = %e, "request failed; retrying");
                if !wait.is_zero() {
                    tokio::time::sleep(wait).await;
                }
                attempt += 1;
            }
        }
    }
}
