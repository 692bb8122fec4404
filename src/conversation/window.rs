//! Sliding-window context assembly.
//!
//! Builds the outgoing message sequence for one call from the system
//! prompt, the persisted history, and the new user message. Pure: no I/O,
//! and the persisted state is never mutated here - the session store
//! appends turns only after a successful completion.

use super::{ConversationState, Message};

/// Number of user+assistant pairs kept from history (2 messages per pair).
pub const DEFAULT_MAX_TURNS: usize = 5;

/// Outgoing messages plus a flag telling the caller that even the minimal
/// sequence (system + new user) exceeds the context limit, so a
/// larger-window model is required.
#[derive(Debug)]
pub struct AssembledContext {
    pub messages: Vec<Message>,
    pub escalation_required: bool,
}

/// Approximate token count: `ceil(chars / 4)` per message, summed.
///
/// Character-based on purpose - the backends tokenize differently, and four
/// characters per token is close enough to keep the window predictable.
pub fn estimate_tokens(messages: &[Message]) -> usize {
    messages.iter().map(|m| m.content.chars().count().div_ceil(4)).sum()
}

/// Assemble `[system] + windowed history + [new user]`.
///
/// History is first cut to the last `max_turns` pairs, then whole pairs are
/// dropped oldest-first while the token estimate exceeds `context_limit`.
/// When nothing but the system prompt and the new user message remain and
/// the estimate is still over the limit, the sequence is returned as-is
/// with `escalation_required` set.
pub fn assemble(
    system_prompt: &str,
    state: &ConversationState,
    user_content: &str,
    max_turns: usize,
    context_limit: usize,
) -> AssembledContext {
    let window_start = state.messages.len().saturating_sub(max_turns * 2);
    let mut history: Vec<Message> = state.messages[window_start..].to_vec();

    let build = |history: &[Message]| {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(Message::system(system_prompt));
        messages.extend_from_slice(history);
        messages.push(Message::user(user_content));
        messages
    };

    let mut messages = build(&history);
    while estimate_tokens(&messages) > context_limit && history.len() >= 2 {
        history.drain(..2);
        messages = build(&history);
    }

    let escalation_required = estimate_tokens(&messages) > context_limit;
    AssembledContext { messages, escalation_required }
}
