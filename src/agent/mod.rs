//! Agent classification.
//!
//! An agent is a label paired with a system prompt that biases the model's
//! register. Classification is deterministic keyword matching over the
//! prompt plus attachment signals; an explicit `--agent` override resolves
//! against user-configured custom agents instead and bypasses matching.

pub mod classifier;
pub mod prompts;

use std::fmt;

pub use classifier::{classify_agent, stdin_looks_like_stderr};
pub use prompts::system_prompt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentKind {
    Debugger,
    Summarizer,
    Creative,
    Coder,
    Default,
    Custom(String),
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentKind::Debugger => write!(f, "DEBUGGER"),
            AgentKind::Summarizer => write!(f, "SUMMARIZER"),
            AgentKind::Creative => write!(f, "CREATIVE"),
            AgentKind::Coder => write!(f, "CODER"),
            AgentKind::Default => write!(f, "DEFAULT"),
            AgentKind::Custom(name) => write!(f, "CUSTOM({name})"),
        }
    }
}
