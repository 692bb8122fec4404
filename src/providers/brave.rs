//! Brave Search summarizer backend.
//!
//! Brave is not a chat backend: each call is a standalone summarizer
//! search. The message history is collapsed to the last user message with
//! envelope blocks stripped, so the provider is stateless per call - prior
//! turns are never sent.

use reqwest::blocking::Client;
use serde::Deserialize;

use super::LlmProvider;
use super::error::{ProviderError, http_error};
use super::response::LlmResponse;
use crate::conversation::{Message, Role, strip_envelopes};

pub const BRAVE_ENDPOINT: &str = "https://api.search.brave.com/res/v1/summarizer/search";

#[derive(Debug)]
pub struct BraveProvider {
    client: Client,
    api_key: String,
    endpoint: String,
}

#[derive(Deserialize)]
struct BraveResponse {
    summarizer: Option<Summarizer>,
}

#[derive(Deserialize)]
struct Summarizer {
    summary: Option<String>,
}

impl BraveProvider {
    pub fn new(client: Client, api_key: String) -> Self {
        Self::with_endpoint(client, api_key, BRAVE_ENDPOINT.to_string())
    }

    /// Endpoint override, used by tests against a local mock server.
    pub fn with_endpoint(client: Client, api_key: String, endpoint: String) -> Self {
        Self { client, api_key, endpoint }
    }

    /// The summarizer query: last user message, envelopes removed.
    fn query_from(messages: &[Message]) -> Option<String> {
        messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| strip_envelopes(&m.content))
            .filter(|q| !q.is_empty())
    }
}

impl LlmProvider for BraveProvider {
    fn name(&self) -> &'static str {
        "brave"
    }

    fn call(&self, _model: &str, messages: &[Message]) -> Result<LlmResponse, ProviderError> {
        let query = Self::query_from(messages).ok_or_else(|| ProviderError::Api {
            provider: "brave",
            message: "a user query is required".to_string(),
        })?;

        let response = self
            .client
            .get(&self.endpoint)
            .header("X-Subscription-Token", &self.api_key)
            .header("Accept", "application/json")
            .query(&[("q", query.as_str()), ("summary", "true")])
            .send()
            .map_err(|e| ProviderError::Api {
                provider: "brave",
                message: format!("connection failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(http_error("brave", status.as_u16(), body));
        }

        let data: BraveResponse = response.json().map_err(|e| ProviderError::Api {
            provider: "brave",
            message: format!("invalid JSON response: {e}"),
        })?;

        let summary = data
            .summarizer
            .and_then(|s| s.summary)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ProviderError::Api {
                provider: "brave",
                message: "no summary in response".to_string(),
            })?;

        Ok(LlmResponse {
            content: summary,
            model_used: "brave-summarizer".to_string(),
            prompt_tokens: None,
            completion_tokens: None,
            total_tokens: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_is_last_user_message_with_envelopes_stripped() {
        let messages = vec![
            Message::system("helper"),
            Message::user("old question"),
            Message::assistant("old answer"),
            Message::user(
                "new question\n\n===FILE_START===\nfile body\n===FILE_END===",
            ),
        ];
        assert_eq!(BraveProvider::query_from(&messages).as_deref(), Some("new question"));
    }

    #[test]
    fn test_query_missing_when_no_user_message() {
        let messages = vec![Message::system("helper")];
        assert!(BraveProvider::query_from(&messages).is_none());
    }
}
