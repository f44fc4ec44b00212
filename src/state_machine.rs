//! Orchestration cycle state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions:
//! the runtime feeds events in and executes the effects that come out.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::{Event, SafetyVerdict};
pub use state::{CycleContext, CycleState};
pub use transition::{transition, TransitionError};
