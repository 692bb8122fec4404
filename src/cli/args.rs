//! CLI argument definitions.

use clap::Parser;

/// Terminal LLM assistant.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "aifr",
    disable_version_flag = true,
    about = "Aifr - terminal LLM assistant",
    after_help = "Examples:\n\
        \x20 aifr 'What is Rust?'\n\
        \x20 aifr -f README.md 'Summarize this file'\n\
        \x20 aifr -c 'cargo test' 'Why does this fail?'\n\
        \x20 cat error.log | aifr 'Explain this'\n\
        \x20 aifr --reset\n\n\
        Notes:\n\
        \x20 The brave provider is stateless per call: only the latest\n\
        \x20 question is sent, conversation history is not."
)]
pub struct CliArgs {
    /// Question for the model (alternatively use -p/--prompt)
    pub prompt: Option<String>,

    /// Explicit prompt text
    #[arg(short = 'p', long = "prompt", value_name = "TEXT")]
    pub prompt_flag: Option<String>,

    /// File(s) to attach as context (repeatable, max 5 MiB each)
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Vec<String>,

    /// Shell command to run; its output is attached as context
    #[arg(short = 'c', long = "console", value_name = "COMMAND")]
    pub console: Option<String>,

    /// Force a model: id, configured alias, or provider/id
    #[arg(short = 'm', long = "model", value_name = "NAME")]
    pub model: Option<String>,

    /// Maximum context window estimate in tokens
    #[arg(long = "context-limit", value_name = "N")]
    pub context_limit: Option<usize>,

    /// Use a custom agent from the config
    #[arg(long = "agent", value_name = "NAME")]
    pub agent: Option<String>,

    /// Clear the persisted session and exit
    #[arg(long = "reset", visible_alias = "new")]
    pub reset: bool,

    /// Print agent, model, and token usage to stderr
    #[arg(long = "stats", visible_alias = "info")]
    pub stats: bool,

    /// Raw output: no markdown colors even on a TTY
    #[arg(short = 'r', long = "raw")]
    pub raw: bool,

    /// List known models and exit
    #[arg(long = "list-models")]
    pub list_models: bool,

    /// Named session instead of the default one
    #[arg(long = "session", value_name = "NAME")]
    pub session: Option<String>,

    /// Print version and exit
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    #[arg(short = 'i', long = "interactive", hide = true)]
    pub interactive: bool,
}

impl CliArgs {
    /// The effective prompt: explicit flag wins over the positional.
    pub fn effective_prompt(&self) -> Option<&str> {
        self.prompt_flag.as_deref().or(self.prompt.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_prompt() {
        let args = CliArgs::parse_from(["aifr", "What is 2+2?"]);
        assert_eq!(args.effective_prompt(), Some("What is 2+2?"));
    }

    #[test]
    fn test_prompt_flag_wins_over_positional() {
        let args = CliArgs::parse_from(["aifr", "positional", "-p", "flagged"]);
        assert_eq!(args.effective_prompt(), Some("flagged"));
    }

    #[test]
    fn test_repeatable_files_keep_order() {
        let args = CliArgs::parse_from(["aifr", "q", "-f", "a.md", "-f", "b.md"]);
        assert_eq!(args.file, vec!["a.md", "b.md"]);
    }

    #[test]
    fn test_reset_alias_new() {
        assert!(CliArgs::parse_from(["aifr", "--new"]).reset);
        assert!(CliArgs::parse_from(["aifr", "--reset"]).reset);
    }

    #[test]
    fn test_stats_alias_info() {
        assert!(CliArgs::parse_from(["aifr", "q", "--info"]).stats);
    }

    #[test]
    fn test_unknown_flag_is_a_parse_error() {
        assert!(CliArgs::try_parse_from(["aifr", "--frobnicate"]).is_err());
    }
}
