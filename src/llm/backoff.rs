// src/llm/backoff.rs

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::llm::transport::{CompletionRequest, TextCompletion, TransportError};

/// Injectable clock for retry waits.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real sleeper backed by `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Retries rate-limited exchanges with linear backoff.
///
/// The wait before retry `n` (1-based) is `step * n`. Errors that are not
/// rate limits are returned immediately.
pub struct RateLimitRetry<T> {
    inner: T,
    sleeper: Arc<dyn Sleeper>,
    max_attempts: u32,
    step: Duration,
}

impl<T: TextCompletion> RateLimitRetry<T> {
    pub fn new(inner: T, sleeper: Arc<dyn Sleeper>, max_attempts: u32, step: Duration) -> Self {
        Self {
            inner,
            sleeper,
            max_attempts: max_attempts.max(1),
            step,
        }
    }
}

#[async_trait]
impl<T: TextCompletion> TextCompletion for RateLimitRetry<T> {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, TransportError> {
        for attempt in 1..=self.max_attempts {
            match self.inner.complete(request).await {
                Ok(text) => return Ok(text),
                Err(err) if err.is_rate_limit() => {
                    if attempt == self.max_attempts {
                        warn!(attempt, error = %err, "rate limited on final attempt");
                        break;
                    }
                    let wait = self.step * attempt;
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        wait_secs = wait.as_secs(),
                        "rate limited; backing off"
                    );
                    self.sleeper.sleep(wait).await;
                }
                Err(err) => return Err(err),
            }
        }
        Err(TransportError::RetriesExhausted(self.max_attempts))
    }
}
