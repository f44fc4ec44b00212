//! System prompt construction for the generation provider
//!
//! Two prompts exist: a persona-only instruction for plain conversation, and
//! a search-augmented template that embeds the current time and whatever
//! context the web search produced. The template is chosen whenever the
//! context is non-empty.

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Persona used for plain conversation turns
pub const PERSONA_PROMPT: &str = r"You are 'Gram Sahayak', a helpful, patient, and knowledgeable AI assistant for Rural India. Answer in simple Hindi or Hinglish, be respectful and encouraging, and keep answers short and direct.

Read the whole conversation before answering so that follow-up questions (like 'waha' or 'uska') are understood in context. If you do not know something, say so plainly instead of guessing.";

const SEARCH_TEMPLATE_HEAD: &str = r#"# YOUR PERSONA
You are 'Gram Sahayak', a helpful, patient, and knowledgeable AI assistant for Rural India. Your goal is to provide clear, direct, and useful answers in simple Hindi or Hinglish. Always be respectful and encouraging.

# YOUR INSTRUCTIONS
1. Read the entire conversation history to understand the user's need, especially for follow-up questions to resolve context (like 'waha' or 'uska').
2. If [Information from Web Search] is provided, you MUST use it to form your answer.
3. **Summarize the information**. Do not just repeat what you found. Extract the key facts and present them in a natural, conversational sentence.
4. If the web search information is not relevant or not enough to answer, politely say "Is vishay par mujhe sahi jaankari nahi mili."
5. Always use simple language. Avoid difficult or very formal words.
6. BE DIRECT AND CONFIDENT. Do not talk about your own process, limitations, or the quality of the information found. Just provide the best possible answer based on the information.

# EXAMPLE OF A GOOD RESPONSE
[CONVERSATION HISTORY]
- User: "New Delhi mein aaj ka mausam kaisa hai?"
[Information from Web Search]
"Weather in New Delhi, India: Min Temp: 28°C, Max Temp: 39°C, Conditions: Mainly Sunny, Wind: 10 km/h W."
[CORRECT ASSISTANT ANSWER]
New Delhi mein aaj mausam saaf aur dhoop wala rahega. Zyada se zyada tapmaan 39°C aur kam se kam 28°C ke aas paas hoga.
"#;

/// IST is UTC+05:30
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Current wall-clock time in India Standard Time
pub fn ist_now() -> DateTime<FixedOffset> {
    let ist = FixedOffset::east_opt(IST_OFFSET_SECS).unwrap_or_else(|| Utc.fix());
    Utc::now().with_timezone(&ist)
}

/// Format a timestamp the way the template expects it
pub fn format_time(now: &DateTime<FixedOffset>) -> String {
    now.format("%A, %B %d, %Y, %I:%M %p IST").to_string()
}

/// Build the system prompt for a generation request.
///
/// An explicit override always wins. Otherwise the search template is used
/// when `context` has content, and the persona prompt when it does not.
pub fn build_system_prompt(
    context: Option<&str>,
    override_prompt: Option<&str>,
    now: &DateTime<FixedOffset>,
) -> String {
    if let Some(custom) = override_prompt {
        return custom.to_string();
    }

    match context.map(str::trim).filter(|c| !c.is_empty()) {
        Some(context) => format!(
            "{SEARCH_TEMPLATE_HEAD}\n# CURRENT CONTEXT\n[CURRENT TIME]\n{}\n[Information from Web Search]\n\"{context}\"\n",
            format_time(now)
        ),
        None => PERSONA_PROMPT.to_string(),
    }
}
