//! Pure state transition function

use super::{CycleContext, CycleState, Effect, Event};
use crate::replies::FailureKind;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: CycleState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: CycleState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("A response cycle is already in progress for this conversation")]
    CycleInProgress,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs and performs no
/// I/O. Every cycle that reaches `Done` emits exactly one
/// `AppendAssistantTurn`.
pub fn transition(
    state: &CycleState,
    context: &CycleContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // Cycle start
        // ============================================================

        (state, Event::UserTurn) => {
            if state.accepts_user_turn() {
                Ok(TransitionResult::new(CycleState::Classifying).with_effect(Effect::Classify))
            } else {
                Err(TransitionError::CycleInProgress)
            }
        }

        // ============================================================
        // Routing
        // ============================================================

        // No retries and no re-classification: the first decision stands
        (CycleState::Classifying, Event::Classified { label }) => {
            Ok(TransitionResult::new(CycleState::Dispatching { label })
                .with_effect(Effect::Dispatch { label }))
        }

        (CycleState::Dispatching { label: expected }, Event::BranchStarted { label })
            if *expected == label =>
        {
            Ok(TransitionResult::new(CycleState::BranchExecuting { label })
                .with_effect(Effect::RunBranch { label }))
        }

        // ============================================================
        // Branch output
        // ============================================================

        (CycleState::BranchExecuting { label }, Event::BranchCompleted { turn }) => {
            let label = *label;
            if context.safety_check {
                let response = turn.text().to_string();
                Ok(TransitionResult::new(CycleState::SafetyChecking {
                    label,
                    candidate: turn,
                })
                .with_effect(Effect::CheckSafety { response }))
            } else {
                Ok(TransitionResult::new(CycleState::Done { label }).with_effect(Effect::append(turn)))
            }
        }

        // Fail closed: anything but an explicit safe verdict is a refusal
        (CycleState::SafetyChecking { label, candidate }, Event::SafetyChecked { verdict }) => {
            let done = TransitionResult::new(CycleState::Done { label: *label });
            if verdict.allows_answer() {
                Ok(done.with_effect(Effect::append(candidate.clone())))
            } else {
                Ok(done.with_effect(Effect::append_replacement(FailureKind::Unsafe.turn())))
            }
        }

        (state, event) => Err(TransitionError::InvalidTransition(format!(
            "No transition from {state:?} on {event:?}"
        ))),
    }
}
