//! Runtime for executing response cycles
//!
//! The executor owns the collaborators and drives the pure state machine:
//! each transition's effects are executed in order and any event they
//! produce is fed back in until the cycle reaches `Done`.

mod executor;

#[cfg(test)]
pub mod testing;

pub use executor::Orchestrator;

use crate::agent::IntentLabel;
use crate::conversation::{Turn, TurnError};
use crate::state_machine::TransitionError;
use thiserror::Error;

/// What one completed cycle produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleOutcome {
    pub label: IntentLabel,
    /// The assistant turn that was appended
    pub turn: Turn,
    /// The safety check replaced the branch's answer with a refusal
    pub replaced: bool,
}

/// Why a cycle could not run
///
/// Collaborator failures never show up here; they are absorbed into the
/// appended turn. Only a broken precondition stops a cycle.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("Conversation does not end with a user turn")]
    NoPendingUserTurn,
    #[error("Invalid user message: {0}")]
    InvalidUserTurn(#[from] TurnError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
}
