//! API request and response types

use crate::agent::IntentLabel;
use crate::conversation::Turn;
use serde::{Deserialize, Serialize};

/// Request to create a new conversation
#[derive(Debug, Default, Deserialize)]
pub struct CreateConversationRequest {
    /// Prior turns to restore, e.g. from a client that kept its own history
    #[serde(default)]
    pub turns: Vec<Turn>,
}

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// Response with a conversation transcript
#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub id: String,
    pub turns: Vec<Turn>,
}

/// Response for a chat message: the single assistant turn it produced
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub turn: Turn,
    pub intent: IntentLabel,
    /// The answer was withheld by the safety check
    pub replaced: bool,
}

/// Simple success response
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
