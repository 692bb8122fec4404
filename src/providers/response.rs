//! Normalized completion response.

/// What every backend returns after a successful call.
///
/// Token counts are optional: the Brave summarizer reports no usage at all,
/// and OpenAI-shaped backends occasionally omit the block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmResponse {
    pub content: String,
    pub model_used: String,
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
}
