// src/llm/service.rs

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{ContentError, Result};
use crate::llm::backoff::Sleeper;
use crate::llm::repair::parse_json_lenient;
use crate::llm::transport::{CompletionRequest, TextCompletion};

/// Appended to every system prompt sent through [`JsonCompletionService`].
pub const JSON_OUTPUT_INSTRUCTIONS: &str = "

CRITICAL INSTRUCTIONS:
1. Respond with ONLY valid JSON
2. Do NOT include any text before or after the JSON
3. Do NOT use markdown code blocks
4. Start your response with [ or { and end with ] or }
5. Use double quotes for all strings
6. Do NOT include newlines within string values";

/// Prompt in, parsed JSON out.
///
/// This is the only thing step bodies know about the model.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete_json(&self, system: &str, user: &str, max_output_tokens: u32)
    -> Result<Value>;
}

/// Composes a [`TextCompletion`] with the repair layer and bounded parse
/// retries.
///
/// Each round is one transport call, one repair pass and one strict parse. A
/// failed parse waits `parse_retry_delay` and asks again with a fresh call.
/// Transport errors are not retried here; rate limits are handled below this
/// layer by [`RateLimitRetry`](crate::llm::backoff::RateLimitRetry).
pub struct JsonCompletionService<T> {
    transport: T,
    sleeper: Arc<dyn Sleeper>,
    max_attempts: u32,
    parse_retry_delay: Duration,
}

impl<T: TextCompletion> JsonCompletionService<T> {
    pub fn new(
        transport: T,
        sleeper: Arc<dyn Sleeper>,
        max_attempts: u32,
        parse_retry_delay: Duration,
    ) -> Self {
        Self {
            transport,
            sleeper,
            max_attempts: max_attempts.max(1),
            parse_retry_delay,
        }
    }
}

#[async_trait]
impl<T: TextCompletion> CompletionService for JsonCompletionService<T> {
    async fn complete_json(
        &self,
        system: &str,
        user: &str,
        max_output_tokens: u32,
    ) -> Result<Value> {
        let request = CompletionRequest {
            system: format!("{system}{JSON_OUTPUT_INSTRUCTIONS}"),
            user: user.to_string(),
            max_output_tokens,
        };

        let mut last_error = String::new();
        for attempt in 1..=self.max_attempts {
            let text = self.transport.complete(&request).await.map_err(|e| {
                ContentError::GenerationFailure(format!("completion request failed: {e}"))
            })?;

            match parse_json_lenient(&text) {
                Ok(value) => {
                    debug!(attempt, "completion parsed as JSON");
                    return Ok(value);
                }
                Err(err) => {
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %err,
                        "completion was not valid JSON"
                    );
                    last_error = err.to_string();
                    if attempt < self.max_attempts {
                        self.sleeper.sleep(self.parse_retry_delay).await;
                    }
                }
            }
        }

        Err(ContentError::GenerationFailure(format!(
            "invalid JSON from model after {} attempts: {last_error}",
            self.max_attempts
        )))
    }
}
