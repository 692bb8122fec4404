//! Application configuration.
//!
//! Read once at startup from `<user-config>/aifr/config.json` plus the
//! provider API-key environment variables, then treated as immutable for
//! the lifetime of the process. Unknown config fields are ignored.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// Approximate token budget for the outgoing context.
pub const DEFAULT_CONTEXT_LIMIT: usize = 6000;

/// Wall-clock bound on one completion call.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

const CONFIG_FILENAME: &str = "config.json";

/// A user-defined agent: its own system prompt, optionally pinned to a
/// model and provider.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomAgent {
    pub system_prompt: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
}

/// On-disk config shape. Every field is optional; resolution against the
/// environment happens in [`resolve`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default, alias = "model")]
    pub model_default: Option<String>,
    #[serde(default)]
    pub context_limit: Option<usize>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub model_aliases: BTreeMap<String, String>,
    #[serde(default)]
    pub custom_agents: BTreeMap<String, CustomAgent>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

/// Provider API keys from the environment.
#[derive(Debug, Clone, Default)]
pub struct EnvKeys {
    pub sherlock: Option<String>,
    pub openai: Option<String>,
    pub openwebui: Option<String>,
    pub brave: Option<String>,
}

impl EnvKeys {
    pub fn from_env() -> Self {
        let read = |name: &str| env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            sherlock: read("SHERLOCK_API_KEY"),
            openai: read("OPENAI_API_KEY"),
            openwebui: read("OPENWEBUI_API_KEY"),
            brave: read("BRAVE_API_KEY"),
        }
    }

    fn key_for(&self, provider: &str) -> Option<&str> {
        match provider {
            "sherlock" => self.sherlock.as_deref(),
            "openai" => self.openai.as_deref(),
            "openwebui" => self.openwebui.as_deref(),
            "brave" => self.brave.as_deref(),
            _ => None,
        }
    }
}

/// Resolved application configuration, read-only for the rest of the run.
///
/// API keys are kept per provider rather than as one resolved string: a
/// custom agent or a `provider/model` override can route a single call to
/// a different backend than the default, and that call must authenticate
/// with that backend's own key. Use [`AppConfig::api_key_for`] with the
/// provider that actually receives the request.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub provider: String,
    pub env_keys: EnvKeys,
    pub file_api_key: Option<String>,
    pub model_default: Option<String>,
    pub context_limit: usize,
    pub base_url: Option<String>,
    pub model_aliases: BTreeMap<String, String>,
    pub custom_agents: BTreeMap<String, CustomAgent>,
    pub request_timeout: Duration,
}

impl AppConfig {
    /// The key for the provider a call is routed to: that provider's
    /// environment variable, or `api_key` from the config file.
    pub fn api_key_for(&self, provider: &str) -> Result<String> {
        match self.env_keys.key_for(provider).map(str::to_string).or_else(|| self.file_api_key.clone())
        {
            Some(key) => Ok(key),
            None => bail!(
                "no API key for provider {provider}: set {}_API_KEY or add api_key to {}",
                provider.to_ascii_uppercase(),
                config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "the config file".into())
            ),
        }
    }
}

/// Load and resolve the effective configuration.
pub fn load() -> Result<AppConfig> {
    resolve(read_config_file(), EnvKeys::from_env())
}

/// Combine the config file with environment keys.
///
/// Provider: explicit config wins; otherwise the first present key in the
/// fixed priority OPENAI > BRAVE > OPENWEBUI > SHERLOCK selects it, falling
/// back to sherlock. A key for the default provider must exist up front;
/// keys for other providers are looked up per call.
pub fn resolve(file: FileConfig, env: EnvKeys) -> Result<AppConfig> {
    let provider = match file.provider {
        Some(provider) => provider.to_ascii_lowercase(),
        None => {
            if env.openai.is_some() {
                "openai".to_string()
            } else if env.brave.is_some() {
                "brave".to_string()
            } else if env.openwebui.is_some() {
                "openwebui".to_string()
            } else {
                "sherlock".to_string()
            }
        }
    };

    let cfg = AppConfig {
        provider,
        env_keys: env,
        file_api_key: file.api_key,
        model_default: file.model_default,
        context_limit: file.context_limit.unwrap_or(DEFAULT_CONTEXT_LIMIT),
        base_url: file.base_url,
        model_aliases: file.model_aliases,
        custom_agents: file.custom_agents,
        request_timeout: Duration::from_secs(
            file.request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        ),
    };

    // Fail before any remote I/O when the default provider has no key
    cfg.api_key_for(&cfg.provider)?;
    Ok(cfg)
}

/// Path of the config file: `<user-config>/aifr/config.json`.
pub fn config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("failed to resolve the platform config directory")?;
    Ok(base.join("aifr").join(CONFIG_FILENAME))
}

fn read_config_file() -> FileConfig {
    let Ok(path) = config_path() else { return FileConfig::default() };
    let Ok(raw) = fs::read_to_string(&path) else { return FileConfig::default() };
    match serde_json::from_str(&raw) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Notice: ignoring malformed config file {}: {e}", path.display());
            FileConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_provider_wins_over_env_detection() {
        let file = FileConfig {
            provider: Some("sherlock".to_string()),
            api_key: Some("from-file".to_string()),
            ..Default::default()
        };
        let env = EnvKeys { openai: Some("oa-key".to_string()), ..Default::default() };
        let cfg = resolve(file, env).unwrap();
        assert_eq!(cfg.provider, "sherlock");
        // No SHERLOCK_API_KEY in env, so the file key is used
        assert_eq!(cfg.api_key_for("sherlock").unwrap(), "from-file");
    }

    #[test]
    fn test_env_detection_priority() {
        let env = EnvKeys {
            openai: Some("oa".to_string()),
            brave: Some("br".to_string()),
            openwebui: Some("ow".to_string()),
            sherlock: Some("sh".to_string()),
        };
        let cfg = resolve(FileConfig::default(), env).unwrap();
        assert_eq!(cfg.provider, "openai");
        assert_eq!(cfg.api_key_for("openai").unwrap(), "oa");
    }

    #[test]
    fn test_brave_detected_when_no_openai_key() {
        let env = EnvKeys { brave: Some("br".to_string()), ..Default::default() };
        let cfg = resolve(FileConfig::default(), env).unwrap();
        assert_eq!(cfg.provider, "brave");
    }

    #[test]
    fn test_sherlock_is_the_fallback_provider() {
        let env = EnvKeys { sherlock: Some("sh".to_string()), ..Default::default() };
        let cfg = resolve(FileConfig::default(), env).unwrap();
        assert_eq!(cfg.provider, "sherlock");
        assert_eq!(cfg.api_key_for("sherlock").unwrap(), "sh");
    }

    #[test]
    fn test_missing_api_key_is_an_error() {
        let err = resolve(FileConfig::default(), EnvKeys::default()).unwrap_err();
        assert!(err.to_string().contains("API key"));
    }

    #[test]
    fn test_key_lookup_follows_the_routed_provider() {
        // Default provider is sherlock, but a call routed to openai must
        // authenticate with the openai key
        let env = EnvKeys {
            sherlock: Some("sh".to_string()),
            openai: Some("oa".to_string()),
            ..Default::default()
        };
        let file = FileConfig { provider: Some("sherlock".to_string()), ..Default::default() };
        let cfg = resolve(file, env).unwrap();
        assert_eq!(cfg.api_key_for("sherlock").unwrap(), "sh");
        assert_eq!(cfg.api_key_for("openai").unwrap(), "oa");
    }

    #[test]
    fn test_key_lookup_falls_back_to_file_key_then_errors() {
        let file = FileConfig {
            provider: Some("sherlock".to_string()),
            api_key: Some("from-file".to_string()),
            ..Default::default()
        };
        let cfg = resolve(file, EnvKeys::default()).unwrap();
        assert_eq!(cfg.api_key_for("openwebui").unwrap(), "from-file");

        let bare = FileConfig { provider: Some("sherlock".to_string()), ..Default::default() };
        let env = EnvKeys { sherlock: Some("sh".to_string()), ..Default::default() };
        let cfg = resolve(bare, env).unwrap();
        let err = cfg.api_key_for("openai").unwrap_err();
        assert!(err.to_string().contains("openai"));
    }

    #[test]
    fn test_defaults_applied() {
        let file = FileConfig { api_key: Some("k".to_string()), ..Default::default() };
        let cfg = resolve(file, EnvKeys::default()).unwrap();
        assert_eq!(cfg.context_limit, DEFAULT_CONTEXT_LIMIT);
        assert_eq!(cfg.request_timeout, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let cfg: FileConfig =
            serde_json::from_str(r#"{"api_key":"k","future_feature":true}"#).unwrap();
        assert_eq!(cfg.api_key.as_deref(), Some("k"));
    }

    #[test]
    fn test_model_alias_field_name() {
        let cfg: FileConfig = serde_json::from_str(r#"{"model":"Llama-3.1-8B-Instruct"}"#).unwrap();
        assert_eq!(cfg.model_default.as_deref(), Some("Llama-3.1-8B-Instruct"));
    }
}
