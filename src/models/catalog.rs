//! Known model identifiers.

/// Models served by the Sherlock backend.
pub const SHERLOCK_MODELS: &[&str] = &[
    "Bielik-11B-v2.3-Instruct",
    "Bielik-11B-v2.6-Instruct",
    "DeepSeek-R1-Distill-Llama-70B",
    "Llama-3.1-8B-Instruct",
    "Llama-3.3-70B-Instruct",
    "PLLuM-8x7B-chat",
    "openai/gpt-oss-120b",
];

/// Largest-context model, used when the estimated prompt size exceeds the
/// configured context limit.
pub const LARGE_CONTEXT_MODEL: &str = "openai/gpt-oss-120b";

/// Default when the provider is OpenAI and nothing was requested.
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Sorted list of known models for `--list-models`.
pub fn all_models() -> Vec<&'static str> {
    let mut models = SHERLOCK_MODELS.to_vec();
    models.sort_unstable();
    models
}

/// Provider-appropriate default for non-sherlock backends, if one exists
/// without configuration.
pub fn default_model_for_provider(provider: &str) -> Option<&'static str> {
    match provider {
        "openai" => Some(OPENAI_DEFAULT_MODEL),
        // Brave ignores the model field entirely
        "brave" => Some("brave-summarizer"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_sorted_and_unique() {
        let models = all_models();
        let mut deduped = models.clone();
        deduped.dedup();
        assert_eq!(models, deduped);
        assert!(models.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_large_context_model_is_in_catalog() {
        assert!(SHERLOCK_MODELS.contains(&LARGE_CONTEXT_MODEL));
    }

    #[test]
    fn test_no_default_model_for_sherlock_or_openwebui() {
        assert!(default_model_for_provider("sherlock").is_none());
        assert!(default_model_for_provider("openwebui").is_none());
    }
}
