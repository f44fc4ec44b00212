//! User-facing fallback messages
//!
//! Every failure site draws its text from this table so the wording lives in
//! one place.

use crate::conversation::Turn;

/// Failure sites that produce a fixed reply instead of model output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind<'a> {
    /// The generation provider failed or returned nothing
    Generation,
    /// Web search failed or came back empty; used as generation context
    Search,
    /// Weather lookup failed for the named city
    Weather { city: &'a str },
    /// The safety check rejected the answer (or could not run)
    Unsafe,
}

const GENERATION_APOLOGY: &str = "Maaf kijiye, abhi ek takneeki samasya aa gayi hai.";
const SEARCH_FAILED_CONTEXT: &str = "Maaf kijiye, web search karte samay ek samasya aa gayi.";
const SAFETY_REFUSAL: &str = "Maaf kijiye, main is vishay par charcha nahi kar sakta.";

impl FailureKind<'_> {
    pub fn message(self) -> String {
        match self {
            FailureKind::Generation => GENERATION_APOLOGY.to_string(),
            FailureKind::Search => SEARCH_FAILED_CONTEXT.to_string(),
            FailureKind::Weather { city } => {
                format!("An error occurred while fetching weather for {city}.")
            }
            FailureKind::Unsafe => SAFETY_REFUSAL.to_string(),
        }
    }

    /// The fallback message as an assistant turn
    pub fn turn(self) -> Turn {
        Turn::assistant_unchecked(self.message())
    }
}
