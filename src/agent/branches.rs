//! Branch handlers: one per intent
//!
//! Every branch returns exactly one assistant turn and never an error.
//! Failures of the capability a branch depends on are turned into a fixed
//! reply from [`crate::replies`].

mod general;
mod weather;
mod web_search;

pub use general::GeneralBranch;
pub use weather::WeatherBranch;
pub use web_search::{WebSearchBranch, DEFAULT_MAX_RESULTS};

use super::IntentLabel;
use crate::conversation::{Conversation, Turn};
use crate::llm::{collect_text, LlmRequest, LlmService};
use crate::replies::FailureKind;
use async_trait::async_trait;

#[async_trait]
pub trait Branch: Send + Sync {
    /// The intent this branch serves
    fn label(&self) -> IntentLabel;

    /// Produce the assistant's reply to the latest user turn
    async fn respond(&self, conversation: &Conversation) -> Turn;
}

/// The three branches, addressed by intent
pub struct BranchSet {
    general: GeneralBranch,
    web_search: WebSearchBranch,
    weather: WeatherBranch,
}

impl BranchSet {
    pub fn new(general: GeneralBranch, web_search: WebSearchBranch, weather: WeatherBranch) -> Self {
        Self {
            general,
            web_search,
            weather,
        }
    }

    pub fn for_label(&self, label: IntentLabel) -> &dyn Branch {
        match label {
            IntentLabel::GeneralConversation => &self.general,
            IntentLabel::WebSearch => &self.web_search,
            IntentLabel::WeatherQuery => &self.weather,
        }
    }
}

/// Stream a generation and drain it into one assistant turn.
///
/// Open failures, mid-stream failures and empty output all collapse to the
/// generation apology; partial text is never returned.
async fn generate_turn(llm: &dyn LlmService, request: &LlmRequest) -> Turn {
    let text = match llm.stream(request).await {
        Ok(stream) => collect_text(stream).await,
        Err(e) => Err(e),
    };

    match text {
        Ok(text) => Turn::assistant(text).unwrap_or_else(|_| {
            tracing::warn!(model = %llm.model_id(), "Generation produced no text");
            FailureKind::Generation.turn()
        }),
        Err(e) => {
            tracing::error!(model = %llm.model_id(), error = %e, "Generation failed");
            FailureKind::Generation.turn()
        }
    }
}
