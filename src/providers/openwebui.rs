//! OpenWebUI backend (self-hosted, OpenAI-shaped).

use reqwest::blocking::Client;

use super::LlmProvider;
use super::chat::post_chat;
use super::error::ProviderError;
use super::response::LlmResponse;
use crate::conversation::Message;

#[derive(Debug)]
pub struct OpenWebUiProvider {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl OpenWebUiProvider {
    /// `base_url` is the instance root; the chat endpoint lives under
    /// `/api/chat/completions`.
    pub fn new(client: Client, api_key: String, base_url: &str) -> Self {
        let endpoint = format!("{}/api/chat/completions", base_url.trim_end_matches('/'));
        Self { client, api_key, endpoint }
    }
}

impl LlmProvider for OpenWebUiProvider {
    fn name(&self) -> &'static str {
        "openwebui"
    }

    fn call(&self, model: &str, messages: &[Message]) -> Result<LlmResponse, ProviderError> {
        post_chat(&self.client, self.name(), &self.endpoint, &self.api_key, model, messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let client = Client::new();
        let provider =
            OpenWebUiProvider::new(client, "key".to_string(), "http://localhost:3000/");
        assert_eq!(provider.endpoint, "http://localhost:3000/api/chat/completions");
    }
}
