//! Search-augmented answers
//!
//! The latest user text is sent to the search provider verbatim; follow-up
//! questions are not rewritten with earlier context.

use super::{generate_turn, Branch};
use crate::agent::IntentLabel;
use crate::conversation::{Conversation, Turn};
use crate::llm::{LlmRequest, LlmService};
use crate::replies::FailureKind;
use crate::services::{SearchHit, WebSearch};
use crate::system_prompt::{build_system_prompt, ist_now};
use async_trait::async_trait;
use std::sync::Arc;

/// Result bound requested from the search provider
pub const DEFAULT_MAX_RESULTS: usize = 3;

pub struct WebSearchBranch {
    llm: Arc<dyn LlmService>,
    search: Arc<dyn WebSearch>,
    max_results: usize,
}

impl WebSearchBranch {
    pub fn new(llm: Arc<dyn LlmService>, search: Arc<dyn WebSearch>) -> Self {
        Self {
            llm,
            search,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    #[must_use]
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Run the search and fold the hits into one context block
    async fn search_context(&self, query: &str) -> String {
        match self.search.search(query, self.max_results).await {
            Ok(hits) if !hits.is_empty() => format_context(&hits),
            Ok(_) => {
                tracing::warn!(query = %query, "Web search returned no results");
                FailureKind::Search.message()
            }
            Err(e) => {
                tracing::error!(query = %query, error = %e, "Web search failed");
                FailureKind::Search.message()
            }
        }
    }
}

fn format_context(hits: &[SearchHit]) -> String {
    hits.iter()
        .map(|hit| format!("Source: {}\nContent: {}", hit.source, hit.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[async_trait]
impl Branch for WebSearchBranch {
    fn label(&self) -> IntentLabel {
        IntentLabel::WebSearch
    }

    async fn respond(&self, conversation: &Conversation) -> Turn {
        let query = conversation.latest_user_text().unwrap_or_default();
        let context = self.search_context(query).await;

        let system = build_system_prompt(Some(&context), None, &ist_now());
        let request = LlmRequest::for_conversation(system, conversation);
        generate_turn(self.llm.as_ref(), &request).await
    }
}
