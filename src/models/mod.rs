//! Model catalog and selection.
//!
//! Selection resolves, in order: an explicit override (alias-expanded, with
//! an optional `provider/model` split), a custom agent's pinned model, then
//! keyword classes over the prompt - always against the provider the call
//! is routed to, which a custom agent may have switched away from the
//! configured default. Context escalation to the large-window model is
//! decided by the orchestrator once the outgoing messages are assembled
//! and their size is known.

pub mod catalog;
pub mod selector;

pub use catalog::{LARGE_CONTEXT_MODEL, all_models, default_model_for_provider};
pub use selector::{Selection, auto_select, resolve_alias, select_model};
