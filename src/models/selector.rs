//! Model selection.

use std::collections::BTreeMap;

use anyhow::{Result, bail};

use super::catalog::default_model_for_provider;
use crate::agent::AgentKind;

const DOCUMENT_KEYWORDS: &[&str] =
    &["podsumuj", "streść", "streszcz", "summarize", "tldr", "dokument", "document", "summary", "bielik"];

const CREATIVE_KEYWORDS: &[&str] =
    &["opowiadanie", "wiersz", "story", "poem", "napisz", "twórz", "kreaty", "creative"];

const DIALOG_KEYWORDS: &[&str] = &["rozmowa", "rozmawia", "chat", "dialog", "pllum"];

const ANALYSIS_KEYWORDS: &[&str] = &[
    "analiza", "analyze", "rozumowanie", "debug", "błąd", "error", "fail", "exception", "think",
    "deep",
];

/// A resolved model choice.
///
/// `explicit` records whether the user (or config) named the model
/// directly; context escalation never replaces an explicit choice, it only
/// warns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub model: String,
    /// Provider forced by a `provider/model` override, if any.
    pub provider_override: Option<String>,
    pub explicit: bool,
}

/// Expand a model alias (exact-match key), then split a `provider/model`
/// form into a provider override and the bare model id.
pub fn resolve_alias(
    requested: &str,
    aliases: &BTreeMap<String, String>,
) -> (String, Option<String>) {
    let resolved = aliases.get(requested).map(String::as_str).unwrap_or(requested);
    match resolved.split_once('/') {
        Some((provider, model)) => (model.to_string(), Some(provider.to_string())),
        None => (resolved.to_string(), None),
    }
}

/// Keyword-class selection over the prompt, used for the Sherlock backend
/// when nothing was requested explicitly.
pub fn auto_select(prompt: &str) -> &'static str {
    let normalized = prompt.to_ascii_lowercase();
    let matches = |keywords: &[&str]| keywords.iter().any(|kw| normalized.contains(kw));

    if matches(DOCUMENT_KEYWORDS) {
        "Bielik-11B-v2.6-Instruct"
    } else if matches(CREATIVE_KEYWORDS) {
        "openai/gpt-oss-120b"
    } else if matches(DIALOG_KEYWORDS) {
        "PLLuM-8x7B-chat"
    } else if matches(ANALYSIS_KEYWORDS) {
        "DeepSeek-R1-Distill-Llama-70B"
    } else {
        "Llama-3.1-8B-Instruct"
    }
}

/// Full selection pipeline for one request.
///
/// Order: explicit override (alias-expanded, `provider/model` split) >
/// custom agent's pinned model > per-provider defaults. Errors only when
/// an OpenWebUI backend has no model configured anywhere.
///
/// `provider` must be the provider this request is actually routed to -
/// after any custom-agent override - not the configured default. The
/// per-provider default arms below are meaningless against the wrong
/// backend (a Sherlock catalog name sent to OpenWebUI, say).
pub fn select_model(
    prompt: &str,
    agent: &AgentKind,
    requested: Option<&str>,
    custom_agent_model: Option<&str>,
    provider: &str,
    aliases: &BTreeMap<String, String>,
) -> Result<Selection> {
    if let Some(requested) = requested {
        let (model, provider_override) = resolve_alias(requested, aliases);
        return Ok(Selection { model, provider_override, explicit: true });
    }

    if matches!(agent, AgentKind::Custom(_))
        && let Some(model) = custom_agent_model
    {
        return Ok(Selection { model: model.to_string(), provider_override: None, explicit: false });
    }

    let model = match provider {
        "sherlock" => auto_select(prompt).to_string(),
        "openwebui" => {
            // First configured alias target, in key order
            match aliases.values().next() {
                Some(model) => model.clone(),
                None => bail!(
                    "OpenWebUI needs a model: pass -m, set model_default, or configure model_aliases"
                ),
            }
        }
        other => match default_model_for_provider(other) {
            Some(model) => model.to_string(),
            None => auto_select(prompt).to_string(),
        },
    };

    Ok(Selection { model, provider_override: None, explicit: false })
}
