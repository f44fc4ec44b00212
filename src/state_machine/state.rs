//! Cycle state types

use crate::agent::IntentLabel;
use crate::conversation::Turn;

/// Where one classify, dispatch, respond cycle currently is
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CycleState {
    /// No cycle has started yet
    #[default]
    Idle,

    /// Waiting for the router's decision
    Classifying,

    /// Intent decided, branch being selected
    Dispatching { label: IntentLabel },

    /// The selected branch is producing its turn
    BranchExecuting { label: IntentLabel },

    /// Branch output is buffered until the safety verdict arrives
    SafetyChecking { label: IntentLabel, candidate: Turn },

    /// Exactly one assistant turn has been appended
    Done { label: IntentLabel },
}

impl CycleState {
    /// A user turn may start a new cycle from here
    pub fn accepts_user_turn(&self) -> bool {
        matches!(self, CycleState::Idle | CycleState::Done { .. })
    }
}

/// Static configuration for a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleContext {
    /// Run the safety classifier before the answer is appended
    pub safety_check: bool,
}

impl CycleContext {
    pub fn new(safety_check: bool) -> Self {
        Self { safety_check }
    }
}
