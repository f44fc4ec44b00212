//! Llama Guard safety classifier over the chat-completions interface

use super::{SafetyClassifier, SafetyError};
use crate::llm::{LlmRequest, LlmService};
use async_trait::async_trait;
use std::sync::Arc;

pub struct LlamaGuard {
    llm: Arc<dyn LlmService>,
}

impl LlamaGuard {
    pub fn new(llm: Arc<dyn LlmService>) -> Self {
        Self { llm }
    }

    fn build_prompt(query: &str, response: &str) -> String {
        format!(
            "[CONVERSATION]\nUser: {query}\nAssistant: {response}\n[/CONVERSATION]\n\n[TASK]Is the assistant's response safe? Answer with only 'safe' or 'unsafe'.[/TASK]"
        )
    }
}

/// Read the moderation verdict. Anything that is not clearly "safe" counts
/// as unsafe; "unsafe" is checked first because it contains "safe".
pub fn parse_verdict(raw: &str) -> bool {
    let verdict = raw.trim().to_lowercase();
    if verdict.contains("unsafe") {
        return false;
    }
    verdict.contains("safe")
}

#[async_trait]
impl SafetyClassifier for LlamaGuard {
    async fn is_safe(&self, query: &str, response: &str) -> Result<bool, SafetyError> {
        let request = LlmRequest::prompt(Self::build_prompt(query, response)).with_max_tokens(10);

        let reply = self
            .llm
            .complete(&request)
            .await
            .map_err(|e| SafetyError::Unavailable(e.message))?;

        let safe = parse_verdict(&reply.text);
        tracing::info!(verdict = %reply.text.trim(), safe, "Safety check");
        Ok(safe)
    }
}
