//! Intent routing and the response branches
//!
//! The classifier picks one [`IntentLabel`] per user turn; each label maps to
//! exactly one branch that turns the transcript into a single assistant
//! turn.

mod branches;
mod extractor;
mod intent;

#[cfg(test)]
mod proptests;

pub use branches::{BranchSet, GeneralBranch, WeatherBranch, WebSearchBranch, DEFAULT_MAX_RESULTS};
pub use extractor::extract_city;
pub use intent::{classify, IntentLabel};
