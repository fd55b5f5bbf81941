// src/llm/transport.rs

//! One prompt/response exchange with a chat model, before any JSON handling.

use async_trait::async_trait;
use thiserror::Error;

/// A single chat-completion request: one system and one user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub max_output_tokens: u32,
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("request failed: {0}")]
    Request(String),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("still rate limited after {0} attempts")]
    RetriesExhausted(u32),
}

impl TransportError {
    /// Whether this failure should be retried with backoff.
    ///
    /// HTTP 429 always counts, as does any error message mentioning a rate
    /// or a limit.
    pub fn is_rate_limit(&self) -> bool {
        match self {
            TransportError::RateLimited(_) => true,
            TransportError::Api { status: 429, .. } => true,
            TransportError::Api { message, .. } | TransportError::Request(message) => {
                mentions_rate_limit(message)
            }
            TransportError::Malformed(_) | TransportError::RetriesExhausted(_) => false,
        }
    }
}

fn mentions_rate_limit(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("rate") || lower.contains("limit") || lower.contains("429")
}

/// Raw text completion.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, TransportError>;
}
