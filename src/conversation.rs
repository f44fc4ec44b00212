//! Conversation transcript
//!
//! An append-only, ordered list of turns owned by a single session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Who spoke a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One message in a conversation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    role: Role,
    text: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TurnError {
    #[error("turn text must not be empty")]
    EmptyText,
}

impl Turn {
    pub fn new(role: Role, text: impl Into<String>) -> Result<Self, TurnError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(TurnError::EmptyText);
        }
        Ok(Self { role, text })
    }

    pub fn user(text: impl Into<String>) -> Result<Self, TurnError> {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Result<Self, TurnError> {
        Self::new(Role::Assistant, text)
    }

    /// Build an assistant turn from text already known to be non-empty
    pub(crate) fn assistant_unchecked(text: String) -> Self {
        debug_assert!(!text.trim().is_empty());
        Self {
            role: Role::Assistant,
            text,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl<'de> Deserialize<'de> for Turn {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawTurn {
            role: Role,
            text: String,
        }

        let raw = RawTurn::deserialize(deserializer)?;
        Turn::new(raw.role, raw.text).map_err(serde::de::Error::custom)
    }
}

/// Ordered history of turns for one session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a conversation from turns a surface kept around (e.g. chat history)
    pub fn restore(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Take back the latest turn
    pub fn pop(&mut self) -> Option<Turn> {
        self.turns.pop()
    }

    /// Text of the latest turn if it was spoken by the user
    pub fn pending_user_text(&self) -> Option<&str> {
        self.turns
            .last()
            .filter(|turn| turn.role == Role::User)
            .map(Turn::text)
    }

    /// Text of the most recent user turn anywhere in the history
    pub fn latest_user_text(&self) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|turn| turn.role == Role::User)
            .map(Turn::text)
    }

    /// Plain-text rendering used inside prompts
    pub fn render(&self) -> String {
        self.turns
            .iter()
            .map(|turn| match turn.role {
                Role::User => format!("User: {}", turn.text),
                Role::Assistant => format!("Assistant: {}", turn.text),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
