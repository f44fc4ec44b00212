//! Effects produced by state transitions

use crate::agent::IntentLabel;
use crate::conversation::Turn;

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the router for the intent of the pending user turn
    Classify,

    /// Select the branch for `label`
    Dispatch { label: IntentLabel },

    /// Run the selected branch to completion
    RunBranch { label: IntentLabel },

    /// Classify the buffered answer against the user's query
    CheckSafety { response: String },

    /// Append the cycle's single assistant turn
    AppendAssistantTurn { turn: Turn, replaced: bool },
}

impl Effect {
    pub fn append(turn: Turn) -> Self {
        Effect::AppendAssistantTurn {
            turn,
            replaced: false,
        }
    }

    pub fn append_replacement(turn: Turn) -> Self {
        Effect::AppendAssistantTurn {
            turn,
            replaced: true,
        }
    }
}
