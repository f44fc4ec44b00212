//! Events that drive a cycle

use crate::agent::IntentLabel;
use crate::conversation::Turn;

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A user turn was appended to the conversation
    UserTurn,

    /// The router settled on an intent
    Classified { label: IntentLabel },

    /// The branch for `label` was selected and started
    BranchStarted { label: IntentLabel },

    /// The branch produced its single turn
    BranchCompleted { turn: Turn },

    /// The safety classifier answered (or failed to)
    SafetyChecked { verdict: SafetyVerdict },
}

/// Outcome of a safety check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SafetyVerdict {
    Safe,
    Unsafe,
    /// The classifier could not be reached; treated as unsafe
    Unavailable { reason: String },
}

impl SafetyVerdict {
    pub fn allows_answer(&self) -> bool {
        matches!(self, SafetyVerdict::Safe)
    }
}
