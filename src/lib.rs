//! Aifr - Terminal LLM assistant
//!
//! This library implements the request pipeline behind the `aifr` binary:
//! one invocation classifies the prompt, selects a backend and model,
//! assembles a bounded conversation from the persisted session, issues a
//! single remote completion, and renders the reply. It supports:
//!
//! - Four remote backends (Sherlock, OpenAI, OpenWebUI, Brave) behind one
//!   provider trait
//! - Keyword-based agent classification with per-agent system prompts
//! - Sliding-window conversation memory persisted across invocations
//! - Context-size escalation to a large-window model
//! - Pipe-aware output with optional markdown colorization
//!
//! # Example
//!
//! ```no_run
//! use aifr::conversation::ConversationState;
//! use aifr::session::SessionStore;
//!
//! let store = SessionStore::default_location()?;
//! let state: ConversationState = store.load();
//! println!("{} persisted messages", state.messages.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod conversation;
pub mod input;
pub mod models;
pub mod output;
pub mod providers;
pub mod session;

// Re-export commonly used types
pub use agent::{AgentKind, classify_agent};
pub use conversation::{ConversationState, Message, Role};
pub use providers::{LlmProvider, LlmResponse, ProviderError, create_provider};
pub use session::SessionStore;
