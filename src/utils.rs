use std::future::Future;
use tokio::time::{sleep, Duration};
use tracing::info;

/// Fibonacci backoff schedule: `initial_delay`, `initial_delay`, `2x`, `3x`, `5x`...
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    pub initial_delay: Duration,
    pub max_retries: usize,
}

impl Backoff {
    pub fn new(initial_delay: Duration, max_retries: usize) -> Self {
        Self {
            initial_delay,
            max_retries,
        }
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 8)
    }
}

/// Runs `operation` until it succeeds or `backoff.max_retries` retries are spent.
///
/// Returns the last error once retries run out.
pub async fn retry_with_backoff<T, E, Fut, F>(operation: F, backoff: Backoff) -> Result<T, E>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Debug,
{
    let mut attempt = 0;
    let (mut delay, mut next) = (backoff.initial_delay, backoff.initial_delay);

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if attempt < backoff.max_retries => {
                attempt += 1;
                info!(
                    error = ?e,
                    delay_ms = delay.as_millis() as u64,
                    attempt,
                    max_retries = backoff.max_retries,
                    "operation failed, retrying"
                );
                sleep(delay).await;
                (delay, next) = (next, delay + next);
            }
            Err(e) => return Err(e),
        }
    }
}
