//! City extraction for weather questions

use crate::conversation::Conversation;
use crate::llm::{LlmError, LlmRequest, LlmService};

fn build_extractor_prompt(conversation: &Conversation) -> String {
    let latest = conversation.latest_user_text().unwrap_or_default();
    format!(
        "From the following user query, extract only the city name. If no city is mentioned, use the context from the conversation history. Reply with the city name and nothing else.\n\nConversation:\n{}\n\nLast Query: {latest}",
        conversation.render()
    )
}

/// Ask the router model for the city the user is asking about.
///
/// The trimmed reply is returned as-is; checking that it names a real place
/// is left to the weather lookup.
pub async fn extract_city(
    router: &dyn LlmService,
    conversation: &Conversation,
) -> Result<String, LlmError> {
    let request = LlmRequest::prompt(build_extractor_prompt(conversation)).with_temperature(0.0);
    let response = router.complete(&request).await?;
    let city = response.text.trim().to_string();
    tracing::debug!(city = %city, "Extracted city");
    Ok(city)
}
