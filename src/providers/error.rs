//! Provider error taxonomy.
//!
//! Two kinds matter to the pipeline: a context-length overflow (triggers
//! the single escalation retry) and everything else (reported and fatal).
//! Network failures, non-2xx statuses, and malformed response bodies all
//! normalize to [`ProviderError::Api`] with the provider's name attached.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Non-2xx HTTP, network failure, or malformed response.
    #[error("{provider} API error: {message}")]
    Api { provider: &'static str, message: String },

    /// The prompt exceeded the model's context window.
    #[error("{provider}: context length exceeded: {message}")]
    ContextLength { provider: &'static str, message: String },

    /// Bad provider configuration, raised before any remote I/O.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ProviderError {
    pub fn is_context_length(&self) -> bool {
        matches!(self, ProviderError::ContextLength { .. })
    }
}

/// Phrases that mark a context-window overflow in provider error bodies.
const OVERFLOW_MARKERS: &[&str] = &[
    "context length",
    "maximum context",
    "context_length_exceeded",
    "tokens in the messages",
];

/// Does this HTTP error signal a context-window overflow?
///
/// Matched case-insensitively over the body; 400 and 413 are the statuses
/// providers actually use, but the phrase alone is trusted on any error
/// status.
pub(crate) fn is_context_overflow(body: &str) -> bool {
    let lower = body.to_ascii_lowercase();
    OVERFLOW_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Map an HTTP error response to the right error kind.
pub(crate) fn http_error(provider: &'static str, status: u16, body: String) -> ProviderError {
    if is_context_overflow(&body) {
        ProviderError::ContextLength { provider, message: format!("HTTP {status}: {body}") }
    } else {
        ProviderError::Api { provider, message: format!("HTTP {status}: {body}") }
    }
}
