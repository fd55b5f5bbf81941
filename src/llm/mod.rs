// src/llm/mod.rs

//! Text-completion service.
//!
//! The stack, bottom-up:
//! - [`chat::ChatCompletionsClient`]: one HTTP exchange
//! - [`backoff::RateLimitRetry`]: linear backoff on rate limits
//! - [`service::JsonCompletionService`]: JSON instructions, repair, parse retries
//!
//! Step bodies only see the [`CompletionService`] trait.

pub mod backoff;
pub mod chat;
pub mod repair;
pub mod service;
pub mod transport;

use std::sync::Arc;

use tracing::info;

pub use backoff::{RateLimitRetry, Sleeper, TokioSleeper};
pub use chat::ChatCompletionsClient;
pub use service::{CompletionService, JSON_OUTPUT_INSTRUCTIONS, JsonCompletionService};
pub use transport::{CompletionRequest, TextCompletion, TransportError};

use crate::config::LlmSection;
use crate::errors::{ContentError, Result};

/// Build the production completion stack from the `[llm]` section.
///
/// The API key is read from the environment variable named by
/// `api_key_env`; a missing or empty key is a configuration error.
pub fn build_completion_service(cfg: &LlmSection) -> Result<Arc<dyn CompletionService>> {
    let api_key = std::env::var(&cfg.api_key_env)
        .ok()
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| {
            ContentError::ConfigError(format!(
                "{} not found in environment variables",
                cfg.api_key_env
            ))
        })?;

    let client = ChatCompletionsClient::new(
        &cfg.base_url,
        api_key,
        &cfg.model,
        cfg.temperature,
        cfg.request_timeout(),
    )?;
    info!(model = %client.model(), base_url = %cfg.base_url, "using chat completions endpoint");

    let sleeper: Arc<dyn Sleeper> = Arc::new(TokioSleeper);
    let transport = RateLimitRetry::new(
        client,
        Arc::clone(&sleeper),
        cfg.max_attempts,
        cfg.rate_limit_backoff(),
    );

    Ok(Arc::new(JsonCompletionService::new(
        transport,
        sleeper,
        cfg.max_attempts,
        cfg.parse_retry_delay(),
    )))
}
