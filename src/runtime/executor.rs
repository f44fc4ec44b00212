//! Cycle executor

use super::{CycleOutcome, OrchestratorError};
use crate::agent::{classify, BranchSet};
use crate::conversation::{Conversation, Turn};
use crate::llm::LlmService;
use crate::services::SafetyClassifier;
use crate::state_machine::{
    transition, CycleContext, CycleState, Effect, Event, SafetyVerdict, TransitionError,
};
use std::collections::VecDeque;
use std::sync::Arc;

/// Classifies, dispatches to one branch, safety-checks and appends.
///
/// Collaborators are built once at start-up and shared; the orchestrator
/// holds no per-conversation state, so one instance serves every session.
pub struct Orchestrator {
    router: Arc<dyn LlmService>,
    branches: BranchSet,
    safety: Option<Arc<dyn SafetyClassifier>>,
    context: CycleContext,
}

impl Orchestrator {
    pub fn new(router: Arc<dyn LlmService>, branches: BranchSet) -> Self {
        Self {
            router,
            branches,
            safety: None,
            context: CycleContext::new(false),
        }
    }

    /// Check every answer with `classifier` before it is appended
    #[must_use]
    pub fn with_safety(mut self, classifier: Arc<dyn SafetyClassifier>) -> Self {
        self.safety = Some(classifier);
        self.context = CycleContext::new(true);
        self
    }

    /// Append a user turn and run one cycle for it.
    ///
    /// On error the user turn is taken back out, so the conversation is as
    /// it was before the call.
    pub async fn respond_to(
        &self,
        conversation: &mut Conversation,
        text: &str,
    ) -> Result<CycleOutcome, OrchestratorError> {
        conversation.push(Turn::user(text)?);
        let outcome = self.run(conversation).await;
        if outcome.is_err() {
            conversation.pop();
        }
        outcome
    }

    /// Run one cycle on a conversation that ends with a user turn.
    ///
    /// On success exactly one assistant turn has been appended. On error the
    /// conversation is left untouched.
    pub async fn run(
        &self,
        conversation: &mut Conversation,
    ) -> Result<CycleOutcome, OrchestratorError> {
        if conversation.pending_user_text().is_none() {
            return Err(OrchestratorError::NoPendingUserTurn);
        }

        let mut state = CycleState::Idle;
        let mut events = VecDeque::from([Event::UserTurn]);
        let mut appended = None;

        while let Some(event) = events.pop_front() {
            let result = transition(&state, &self.context, event)?;
            state = result.new_state;

            for effect in result.effects {
                if let Some(next) = self.execute_effect(effect, conversation, &mut appended).await {
                    events.push_back(next);
                }
            }
        }

        match (state, appended) {
            (CycleState::Done { label }, Some((turn, replaced))) => {
                tracing::info!(label = ?label, replaced, turns = conversation.len(), "Cycle complete");
                Ok(CycleOutcome {
                    label,
                    turn,
                    replaced,
                })
            }
            (state, _) => Err(TransitionError::InvalidTransition(format!(
                "Cycle stopped in {state:?} without an answer"
            ))
            .into()),
        }
    }

    async fn execute_effect(
        &self,
        effect: Effect,
        conversation: &mut Conversation,
        appended: &mut Option<(Turn, bool)>,
    ) -> Option<Event> {
        match effect {
            Effect::Classify => {
                let label = classify(self.router.as_ref(), conversation).await;
                Some(Event::Classified { label })
            }

            Effect::Dispatch { label } => {
                let branch = self.branches.for_label(label);
                tracing::debug!(label = ?branch.label(), "Dispatching");
                Some(Event::BranchStarted { label })
            }

            Effect::RunBranch { label } => {
                let turn = self.branches.for_label(label).respond(conversation).await;
                Some(Event::BranchCompleted { turn })
            }

            Effect::CheckSafety { response } => {
                let query = conversation.latest_user_text().unwrap_or_default();
                let verdict = self.check_safety(query, &response).await;
                Some(Event::SafetyChecked { verdict })
            }

            Effect::AppendAssistantTurn { turn, replaced } => {
                if replaced {
                    tracing::warn!("Answer replaced by safety refusal");
                }
                conversation.push(turn.clone());
                *appended = Some((turn, replaced));
                None
            }
        }
    }

    async fn check_safety(&self, query: &str, response: &str) -> SafetyVerdict {
        let Some(classifier) = &self.safety else {
            return SafetyVerdict::Unavailable {
                reason: "no safety classifier configured".to_string(),
            };
        };

        match classifier.is_safe(query, response).await {
            Ok(true) => SafetyVerdict::Safe,
            Ok(false) => SafetyVerdict::Unsafe,
            Err(e) => {
                tracing::error!(error = %e, "Safety check failed, refusing answer");
                SafetyVerdict::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }
}
