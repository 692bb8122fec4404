//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

use aifr::cli::commands::RequestInputs;
use aifr::config::{AppConfig, EnvKeys};
use aifr::conversation::Message;
use aifr::input::LoadedFile;
use aifr::providers::{LlmProvider, LlmResponse, ProviderError};

/// A scripted in-process provider: returns queued results in order and
/// records every call it receives.
#[derive(Debug)]
pub struct StubProvider {
    results: Mutex<Vec<Result<LlmResponse, ProviderError>>>,
    pub calls: Mutex<Vec<(String, Vec<Message>)>>,
}

impl StubProvider {
    /// Stub that answers every call with the same canned content.
    pub fn answering(content: &str) -> Self {
        Self::with_results(vec![Ok(canned_response(content, "stub-model"))])
    }

    /// Stub with an explicit result script; the last result repeats once
    /// the script is exhausted.
    pub fn with_results(results: Vec<Result<LlmResponse, ProviderError>>) -> Self {
        Self { results: Mutex::new(results), calls: Mutex::new(Vec::new()) }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn model_of_call(&self, idx: usize) -> String {
        self.calls.lock().unwrap()[idx].0.clone()
    }

    pub fn messages_of_call(&self, idx: usize) -> Vec<Message> {
        self.calls.lock().unwrap()[idx].1.clone()
    }
}

impl LlmProvider for StubProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn call(&self, model: &str, messages: &[Message]) -> Result<LlmResponse, ProviderError> {
        self.calls.lock().unwrap().push((model.to_string(), messages.to_vec()));
        let mut results = self.results.lock().unwrap();
        if results.len() > 1 {
            results.remove(0)
        } else {
            // Last scripted result repeats for any further calls
            results.first().cloned().unwrap_or_else(|| {
                Err(ProviderError::Api {
                    provider: "stub",
                    message: "no scripted result".to_string(),
                })
            })
        }
    }
}

pub fn canned_response(content: &str, model: &str) -> LlmResponse {
    LlmResponse {
        content: content.to_string(),
        model_used: model.to_string(),
        prompt_tokens: Some(10),
        completion_tokens: Some(5),
        total_tokens: Some(15),
    }
}

pub fn context_length_error() -> ProviderError {
    ProviderError::ContextLength {
        provider: "stub",
        message: "maximum context length exceeded".to_string(),
    }
}

/// Config builder with a sherlock default, mirroring a fresh install.
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig {
                provider: "sherlock".to_string(),
                env_keys: EnvKeys::default(),
                file_api_key: Some("test-key".to_string()),
                model_default: None,
                context_limit: 6000,
                base_url: None,
                model_aliases: BTreeMap::new(),
                custom_agents: BTreeMap::new(),
                request_timeout: Duration::from_secs(5),
            },
        }
    }

    pub fn provider(mut self, provider: &str) -> Self {
        self.config.provider = provider.to_string();
        self
    }

    pub fn env_key(mut self, provider: &str, key: &str) -> Self {
        let key = Some(key.to_string());
        match provider {
            "sherlock" => self.config.env_keys.sherlock = key,
            "openai" => self.config.env_keys.openai = key,
            "openwebui" => self.config.env_keys.openwebui = key,
            "brave" => self.config.env_keys.brave = key,
            other => panic!("unknown provider in test config: {other}"),
        }
        self
    }

    pub fn model_default(mut self, model: &str) -> Self {
        self.config.model_default = Some(model.to_string());
        self
    }

    pub fn context_limit(mut self, limit: usize) -> Self {
        self.config.context_limit = limit;
        self
    }

    pub fn alias(mut self, key: &str, target: &str) -> Self {
        self.config.model_aliases.insert(key.to_string(), target.to_string());
        self
    }

    pub fn custom_agent(mut self, name: &str, agent: aifr::config::CustomAgent) -> Self {
        self.config.custom_agents.insert(name.to_string(), agent);
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

/// Request-inputs builder for driving the pipeline without a real CLI.
pub struct InputsBuilder {
    inputs: RequestInputs,
}

impl InputsBuilder {
    pub fn prompt(prompt: &str) -> Self {
        Self {
            inputs: RequestInputs {
                prompt: prompt.to_string(),
                files: Vec::new(),
                console: None,
                stdin: None,
                model_override: None,
                agent_override: None,
                context_limit_override: None,
            },
        }
    }

    pub fn file(mut self, name: &str, content: &str) -> Self {
        self.inputs.files.push(LoadedFile {
            name: name.to_string(),
            content: content.to_string(),
            size: content.len() as u64,
        });
        self
    }

    pub fn console(mut self, output: &str) -> Self {
        self.inputs.console = Some(output.to_string());
        self
    }

    pub fn stdin(mut self, data: &str) -> Self {
        self.inputs.stdin = Some(data.to_string());
        self
    }

    pub fn model(mut self, model: &str) -> Self {
        self.inputs.model_override = Some(model.to_string());
        self
    }

    pub fn agent(mut self, agent: &str) -> Self {
        self.inputs.agent_override = Some(agent.to_string());
        self
    }

    pub fn build(self) -> RequestInputs {
        self.inputs
    }
}
