//! Common types for LLM interactions

use crate::conversation::{Conversation, Role};
use futures::stream::BoxStream;

use super::LlmError;

/// Lazy, finite sequence of generated text fragments
pub type TextStream = BoxStream<'static, Result<String, LlmError>>;

/// LLM request
#[derive(Debug, Clone, Default)]
pub struct LlmRequest {
    /// System prompt, sent ahead of the conversation when present
    pub system: Option<String>,
    pub messages: Vec<LlmMessage>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl LlmRequest {
    /// Single user prompt with no system message
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            messages: vec![LlmMessage::user(text)],
            ..Self::default()
        }
    }

    /// Full transcript behind a system prompt
    pub fn for_conversation(system: impl Into<String>, conversation: &Conversation) -> Self {
        Self {
            system: Some(system.into()),
            messages: conversation.turns().iter().map(LlmMessage::from).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Message in conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmMessage {
    pub role: MessageRole,
    pub content: String,
}

impl LlmMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

impl From<&crate::conversation::Turn> for LlmMessage {
    fn from(turn: &crate::conversation::Turn) -> Self {
        let role = match turn.role() {
            Role::User => MessageRole::User,
            Role::Assistant => MessageRole::Assistant,
        };
        Self {
            role,
            content: turn.text().to_string(),
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// LLM response
#[derive(Debug, Clone, Default)]
pub struct LlmResponse {
    pub text: String,
    pub usage: Usage,
}

impl LlmResponse {
    #[cfg_attr(not(test), allow(dead_code))] // Used by test doubles
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            usage: Usage::default(),
        }
    }
}

/// Usage statistics
#[derive(Debug, Clone, Default)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}
