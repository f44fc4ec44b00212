//! Plain conversation, answered by the generation model with the persona prompt

use super::{generate_turn, Branch};
use crate::agent::IntentLabel;
use crate::conversation::{Conversation, Turn};
use crate::llm::{LlmRequest, LlmService};
use crate::system_prompt::PERSONA_PROMPT;
use async_trait::async_trait;
use std::sync::Arc;

pub struct GeneralBranch {
    llm: Arc<dyn LlmService>,
}

impl GeneralBranch {
    pub fn new(llm: Arc<dyn LlmService>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Branch for GeneralBranch {
    fn label(&self) -> IntentLabel {
        IntentLabel::GeneralConversation
    }

    async fn respond(&self, conversation: &Conversation) -> Turn {
        tracing::info!(turns = conversation.len(), "Generating general response");
        let request = LlmRequest::for_conversation(PERSONA_PROMPT, conversation);
        generate_turn(self.llm.as_ref(), &request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{LlmError, MessageRole};
    use crate::replies::FailureKind;
    use crate::runtime::testing::MockLlm;

    fn conversation() -> Conversation {
        Conversation::restore(vec![
            Turn::user("Namaste").unwrap(),
            Turn::assistant("Namaste! Batayein.").unwrap(),
            Turn::user("PM Kisan yojana kya hai?").unwrap(),
        ])
    }

    #[tokio::test]
    async fn test_sends_persona_and_full_history() {
        let llm = Arc::new(MockLlm::new("gen"));
        llm.queue_stream(Ok(vec!["PM Kisan kisanon ke liye ".into(), "ek yojana hai.".into()]));
        let branch = GeneralBranch::new(llm.clone());

        let turn = branch.respond(&conversation()).await;
        assert_eq!(turn.text(), "PM Kisan kisanon ke liye ek yojana hai.");

        let requests = llm.recorded_streams();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].system.as_deref(), Some(PERSONA_PROMPT));
        let roles: Vec<_> = requests[0].messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![MessageRole::User, MessageRole::Assistant, MessageRole::User]
        );
    }

    #[tokio::test]
    async fn test_generation_failure_is_apology() {
        let llm = Arc::new(MockLlm::new("gen"));
        llm.queue_stream(Err(LlmError::server_error("down")));
        let branch = GeneralBranch::new(llm);

        let turn = branch.respond(&conversation()).await;
        assert_eq!(turn.text(), FailureKind::Generation.message());
    }
}
