//! Intent classification
//!
//! The router model answers with free text. The reply is lower-cased,
//! trimmed and run through [`ROUTING_RULES`] in order; the first rule whose
//! keyword appears in the reply wins. Anything unmatched is plain
//! conversation, the least capable branch.

use crate::conversation::Conversation;
use crate::llm::{LlmRequest, LlmService};
use serde::{Deserialize, Serialize};

/// Closed set of intents a user turn can be routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentLabel {
    GeneralConversation,
    WeatherQuery,
    WebSearch,
}

impl IntentLabel {
    /// Token the router prompt asks the model to emit
    pub fn token(self) -> &'static str {
        match self {
            IntentLabel::GeneralConversation => "general_conversation",
            IntentLabel::WeatherQuery => "weather_query",
            IntentLabel::WebSearch => "web_search",
        }
    }
}

/// Ordered `(keyword, label)` rules, first match wins.
///
/// `weather_query` is checked before `web_search` because a chatty reply
/// can mention both.
pub const ROUTING_RULES: &[(&str, IntentLabel)] = &[
    ("weather_query", IntentLabel::WeatherQuery),
    ("web_search", IntentLabel::WebSearch),
];

/// Map a raw router reply onto an intent
pub fn label_from_reply(raw: &str) -> IntentLabel {
    let decision = raw.trim().to_lowercase();
    ROUTING_RULES
        .iter()
        .find(|(keyword, _)| decision.contains(keyword))
        .map_or(IntentLabel::GeneralConversation, |(_, label)| *label)
}

fn build_router_prompt(query: &str) -> String {
    format!(
        r#"You are an expert router. Classify the user's query into one of the following categories: '{general}', '{weather}', or '{search}'.
- '{weather}': For any questions about weather or temperature.
- '{search}': For questions that require up-to-date facts that are not about weather.
- '{general}': For conversational questions, greetings, or questions about the AI itself.

Query: "{query}"
Category:"#,
        general = IntentLabel::GeneralConversation.token(),
        weather = IntentLabel::WeatherQuery.token(),
        search = IntentLabel::WebSearch.token(),
    )
}

/// Classify the latest user turn.
///
/// Makes at most one call to the router model and never fails: a missing
/// user turn or a router error both fall back to
/// [`IntentLabel::GeneralConversation`].
pub async fn classify(router: &dyn LlmService, conversation: &Conversation) -> IntentLabel {
    let Some(query) = conversation.pending_user_text() else {
        tracing::warn!(turns = conversation.len(), "No pending user turn to classify");
        return IntentLabel::GeneralConversation;
    };

    let request = LlmRequest::prompt(build_router_prompt(query)).with_temperature(0.0);

    match router.complete(&request).await {
        Ok(response) => {
            let label = label_from_reply(&response.text);
            tracing::info!(raw = %response.text.trim(), label = ?label, "Router decision");
            label
        }
        Err(e) => {
            tracing::warn!(error = %e, "Router call failed, defaulting to general conversation");
            IntentLabel::GeneralConversation
        }
    }
}
