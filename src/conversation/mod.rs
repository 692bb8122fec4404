//! Conversation data model.
//!
//! This module defines the message types shared by the session store, the
//! context window, and the provider adapters:
//!
//! - [`Role`] / [`Message`] - a single conversation turn
//! - [`ConversationState`] - the persisted message sequence
//! - [`envelope`] - context-injection markers embedded in user messages
//! - [`window`] - sliding-window assembly of outgoing messages
//!
//! The persisted state never contains a system message; the system prompt
//! is supplied per call by the agent classifier.

pub mod envelope;
pub mod window;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use envelope::{build_user_message, strip_envelopes};
pub use window::{AssembledContext, DEFAULT_MAX_TURNS, assemble, estimate_tokens};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// Persisted conversation history.
///
/// Invariant: `messages` holds no system entries, and if non-empty it starts
/// with a user message and strictly alternates user/assistant from there.
/// A dangling user turn (no following assistant) is only ever held in memory
/// during an in-flight call and must not be persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationState {
    pub messages: Vec<Message>,
    pub last_updated: DateTime<Utc>,
}

impl ConversationState {
    pub fn empty() -> Self {
        Self { messages: Vec::new(), last_updated: Utc::now() }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Check the persisted-state invariant: user/assistant strictly
    /// alternating, starting with user, no system messages.
    pub fn is_well_formed(&self) -> bool {
        self.messages.iter().enumerate().all(|(idx, msg)| match msg.role {
            Role::System => false,
            Role::User => idx % 2 == 0,
            Role::Assistant => idx % 2 == 1,
        }) && self.messages.len() % 2 == 0
    }

    /// Append one completed exchange and bump `last_updated`.
    pub fn push_turn(
        &mut self,
        user_content: impl Into<String>,
        assistant_content: impl Into<String>,
    ) {
        self.messages.push(Message::user(user_content));
        self.messages.push(Message::assistant(assistant_content));
        self.last_updated = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_state_is_well_formed() {
        assert!(ConversationState::empty().is_well_formed());
    }

    #[test]
    fn test_push_turn_alternates() {
        let mut state = ConversationState::empty();
        state.push_turn("question", "answer");
        state.push_turn("follow-up", "reply");
        assert!(state.is_well_formed());
        assert_eq!(state.messages.len(), 4);
        assert_eq!(state.messages[0].role, Role::User);
        assert_eq!(state.messages[3].role, Role::Assistant);
    }

    #[test]
    fn test_dangling_user_is_not_well_formed() {
        let mut state = ConversationState::empty();
        state.messages.push(Message::user("unanswered"));
        assert!(!state.is_well_formed());
    }

    #[test]
    fn test_system_message_is_not_well_formed() {
        let mut state = ConversationState::empty();
        state.messages.push(Message::system("you are helpful"));
        assert!(!state.is_well_formed());
    }

    #[test]
    fn test_assistant_first_is_not_well_formed() {
        let mut state = ConversationState::empty();
        state.messages.push(Message::assistant("hello"));
        state.messages.push(Message::user("hi"));
        assert!(!state.is_well_formed());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::user("hi")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hi"}"#);
    }
}
