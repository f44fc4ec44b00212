//! Property-based tests for the cycle state machine
//!
//! These tests verify key invariants hold across all possible inputs:
//! - A driven cycle ends in `Done` with exactly one appended turn
//! - Only an explicit safe verdict lets the branch answer through
//! - A user turn is rejected anywhere but `Idle` and `Done`

use super::*;
use crate::agent::IntentLabel;
use crate::conversation::Turn;
use crate::replies::FailureKind;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_label() -> impl Strategy<Value = IntentLabel> {
    prop_oneof![
        Just(IntentLabel::GeneralConversation),
        Just(IntentLabel::WeatherQuery),
        Just(IntentLabel::WebSearch),
    ]
}

fn arb_turn() -> impl Strategy<Value = Turn> {
    "[a-zA-Z0-9 ?.]{0,40}[a-zA-Z0-9?.]".prop_map(|text| Turn::assistant(text).unwrap())
}

fn arb_verdict() -> impl Strategy<Value = SafetyVerdict> {
    prop_oneof![
        Just(SafetyVerdict::Safe),
        Just(SafetyVerdict::Unsafe),
        "[a-z ]{1,20}".prop_map(|reason| SafetyVerdict::Unavailable { reason }),
    ]
}

fn arb_busy_state() -> impl Strategy<Value = CycleState> {
    prop_oneof![
        Just(CycleState::Classifying),
        arb_label().prop_map(|label| CycleState::Dispatching { label }),
        arb_label().prop_map(|label| CycleState::BranchExecuting { label }),
        (arb_label(), arb_turn())
            .prop_map(|(label, candidate)| CycleState::SafetyChecking { label, candidate }),
    ]
}

// ============================================================================
// Helpers
// ============================================================================

/// Drive a full cycle the way the runtime does, answering each effect with
/// the given collaborator outputs. Returns the final state and every
/// appended turn.
fn drive(
    context: CycleContext,
    label: IntentLabel,
    branch_turn: Turn,
    verdict: SafetyVerdict,
) -> (CycleState, Vec<(Turn, bool)>) {
    let mut state = CycleState::Idle;
    let mut events = vec![Event::UserTurn];
    let mut appended = Vec::new();

    while let Some(event) = events.pop() {
        let result = transition(&state, &context, event).unwrap();
        state = result.new_state;
        for effect in result.effects {
            match effect {
                Effect::Classify => events.push(Event::Classified { label }),
                Effect::Dispatch { label } => events.push(Event::BranchStarted { label }),
                Effect::RunBranch { .. } => events.push(Event::BranchCompleted {
                    turn: branch_turn.clone(),
                }),
                Effect::CheckSafety { .. } => events.push(Event::SafetyChecked {
                    verdict: verdict.clone(),
                }),
                Effect::AppendAssistantTurn { turn, replaced } => appended.push((turn, replaced)),
            }
        }
    }

    (state, appended)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_cycle_appends_exactly_one_turn(
        safety_check in any::<bool>(),
        label in arb_label(),
        turn in arb_turn(),
        verdict in arb_verdict(),
    ) {
        let (state, appended) = drive(CycleContext::new(safety_check), label, turn, verdict);
        prop_assert_eq!(state, CycleState::Done { label });
        prop_assert_eq!(appended.len(), 1);
    }

    #[test]
    fn prop_only_safe_verdict_passes_answer(
        label in arb_label(),
        turn in arb_turn(),
        verdict in arb_verdict(),
    ) {
        let safe = verdict.allows_answer();
        let (_, appended) = drive(CycleContext::new(true), label, turn.clone(), verdict);
        let (appended_turn, replaced) = &appended[0];
        if safe {
            prop_assert_eq!(appended_turn, &turn);
            prop_assert!(!replaced);
        } else {
            prop_assert_eq!(appended_turn.text(), FailureKind::Unsafe.message());
            prop_assert!(*replaced);
        }
    }

    #[test]
    fn prop_unchecked_cycle_never_replaces(
        label in arb_label(),
        turn in arb_turn(),
        verdict in arb_verdict(),
    ) {
        let (_, appended) = drive(CycleContext::new(false), label, turn.clone(), verdict);
        prop_assert_eq!(&appended[0], &(turn, false));
    }

    #[test]
    fn prop_busy_state_rejects_user_turn(state in arb_busy_state(), safety_check in any::<bool>()) {
        let result = transition(&state, &CycleContext::new(safety_check), Event::UserTurn);
        prop_assert_eq!(result.unwrap_err(), TransitionError::CycleInProgress);
    }

    #[test]
    fn prop_label_is_fixed_after_classification(label in arb_label(), other in arb_label()) {
        prop_assume!(label != other);
        let state = CycleState::Dispatching { label };
        let result = transition(
            &state,
            &CycleContext::new(true),
            Event::BranchStarted { label: other },
        );
        prop_assert!(matches!(result, Err(TransitionError::InvalidTransition(_))));
    }
}
