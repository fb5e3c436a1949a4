// src/session/history.rs
//! Conversation history kept per session.
//!
//! When the history grows past its cap, the opening turns are kept (that is
//! where people tend to say what they came to talk about) together with the
//! most recent ones; the middle is dropped.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_MESSAGES: usize = 20;

/// Number of leading entries that survive trimming.
pub const PRESERVED_OPENING: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One turn. `parts` is always a single fragment today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub parts: Vec<String>,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![content.into()],
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self::new(Role::Model, content)
    }
}

/// Keeps `[0, 4)` plus the last `max - 4` entries when `entries` exceeds
/// `max`. With `max <= 4` only the first `max` entries remain.
pub fn trim<T>(entries: &mut Vec<T>, max: usize) {
    let len = entries.len();
    if len <= max {
        return;
    }
    let head = PRESERVED_OPENING.min(max);
    let tail = max - head;
    entries.drain(head..len - tail);
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationHistory(Vec<ChatMessage>);

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, role: Role, content: impl Into<String>) {
        self.0.push(ChatMessage::new(role, content));
    }

    pub fn trim(&mut self, max: usize) {
        trim(&mut self.0, max);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Completed user/model exchanges.
    pub fn pair_count(&self) -> usize {
        self.0.len() / 2
    }
}

impl From<Vec<ChatMessage>> for ConversationHistory {
    fn from(messages: Vec<ChatMessage>) -> Self {
        Self(messages)
    }
}
