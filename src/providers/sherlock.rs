//! Sherlock backend (default).

use reqwest::blocking::Client;

use super::LlmProvider;
use super::chat::post_chat;
use super::error::ProviderError;
use super::response::LlmResponse;
use crate::conversation::Message;

pub const SHERLOCK_ENDPOINT: &str =
    "https://api-sherlock.cloudferro.com/openai/v1/chat/completions";

#[derive(Debug)]
pub struct SherlockProvider {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl SherlockProvider {
    pub fn new(client: Client, api_key: String) -> Self {
        Self::with_endpoint(client, api_key, SHERLOCK_ENDPOINT.to_string())
    }

    /// Endpoint override, used by tests against a local mock server.
    pub fn with_endpoint(client: Client, api_key: String, endpoint: String) -> Self {
        Self { client, api_key, endpoint }
    }
}

impl LlmProvider for SherlockProvider {
    fn name(&self) -> &'static str {
        "sherlock"
    }

    fn call(&self, model: &str, messages: &[Message]) -> Result<LlmResponse, ProviderError> {
        post_chat(&self.client, self.name(), &self.endpoint, &self.api_key, model, messages)
    }
}
