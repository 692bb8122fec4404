//! Remote completion backends.
//!
//! Each backend implements [`LlmProvider`]: one `call` that turns a model
//! id and a message sequence into an [`LlmResponse`] or a typed
//! [`ProviderError`]. The factory maps a provider name (case-insensitive)
//! to the adapter:
//!
//! - `sherlock` - OpenAI-shaped chat completions (default backend)
//! - `openai` - api.openai.com chat completions
//! - `openwebui` - self-hosted OpenAI-shaped instance, needs `base_url`
//! - `brave` - Brave Search summarizer, stateless per call

mod brave;
mod chat;
mod error;
mod openai;
mod openwebui;
mod response;
mod sherlock;

use std::time::Duration;

use reqwest::blocking::Client;

pub use brave::BraveProvider;
pub use error::ProviderError;
pub use openai::OpenAiProvider;
pub use openwebui::OpenWebUiProvider;
pub use response::LlmResponse;
pub use sherlock::SherlockProvider;

use crate::conversation::Message;

/// A remote completion backend.
pub trait LlmProvider: std::fmt::Debug {
    fn name(&self) -> &'static str;

    /// Issue one completion. At most one HTTP round trip; no retries here -
    /// the orchestrator owns the escalation retry.
    fn call(&self, model: &str, messages: &[Message]) -> Result<LlmResponse, ProviderError>;
}

/// Build the adapter for `provider_name`.
///
/// Fails before any remote I/O when the name is unknown or when
/// `openwebui` is requested without a `base_url`.
pub fn create_provider(
    provider_name: &str,
    api_key: &str,
    base_url: Option<&str>,
    timeout: Duration,
) -> Result<Box<dyn LlmProvider>, ProviderError> {
    let client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::Config(format!("failed to build HTTP client: {e}")))?;

    let api_key = api_key.to_string();
    match provider_name.to_ascii_lowercase().as_str() {
        "sherlock" => Ok(Box::new(SherlockProvider::new(client, api_key))),
        "openai" => Ok(Box::new(OpenAiProvider::new(client, api_key))),
        "openwebui" => match base_url {
            Some(base_url) => Ok(Box::new(OpenWebUiProvider::new(client, api_key, base_url))),
            None => Err(ProviderError::Config(
                "the openwebui provider requires base_url in the config".to_string(),
            )),
        },
        "brave" => Ok(Box::new(BraveProvider::new(client, api_key))),
        other => Err(ProviderError::Config(format!(
            "unknown provider: {other} (supported: sherlock, openai, openwebui, brave)"
        ))),
    }
}
