//! OpenAI-compatible chat-completions codec.
//!
//! Sherlock, OpenAI, and OpenWebUI all speak the same wire shape; this
//! module holds the request/response types and the shared POST path so the
//! adapters differ only in endpoint and name.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use super::error::{ProviderError, http_error};
use super::response::LlmResponse;
use crate::conversation::Message;

/// Sampling temperature used for every chat completion.
const TEMPERATURE: f32 = 0.2;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
    model: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: Option<u64>,
    completion_tokens: Option<u64>,
    total_tokens: Option<u64>,
}

/// Issue one chat completion against an OpenAI-shaped endpoint.
pub(crate) fn post_chat(
    client: &Client,
    provider: &'static str,
    endpoint: &str,
    api_key: &str,
    model: &str,
    messages: &[Message],
) -> Result<LlmResponse, ProviderError> {
    let request = ChatRequest { model, messages, temperature: TEMPERATURE, stream: false };

    let response = client
        .post(endpoint)
        .bearer_auth(api_key)
        .json(&request)
        .send()
        .map_err(|e| ProviderError::Api { provider, message: format!("connection failed: {e}") })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(http_error(provider, status.as_u16(), body));
    }

    let data: ChatResponse = response
        .json()
        .map_err(|e| ProviderError::Api { provider, message: format!("invalid JSON response: {e}") })?;

    let content = data
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .filter(|content| !content.is_empty())
        .ok_or_else(|| ProviderError::Api {
            provider,
            message: "empty response from model".to_string(),
        })?;

    let usage = data.usage.unwrap_or(Usage {
        prompt_tokens: None,
        completion_tokens: None,
        total_tokens: None,
    });

    Ok(LlmResponse {
        content,
        model_used: data.model.unwrap_or_else(|| model.to_string()),
        prompt_tokens: usage.prompt_tokens,
        completion_tokens: usage.completion_tokens,
        total_tokens: usage.total_tokens,
    })
}
