//! External capabilities the branches depend on
//!
//! Each capability is a narrow trait so the orchestrator can be exercised
//! with test doubles. Production adapters live in the submodules.

mod guard;
mod openweather;
mod tavily;

pub use guard::LlamaGuard;
pub use openweather::OpenWeatherMap;
pub use tavily::TavilySearch;

use async_trait::async_trait;
use thiserror::Error;

// ============================================================================
// Web search
// ============================================================================

/// One search result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Where the content came from (URL)
    pub source: String,
    pub content: String,
}

#[derive(Debug, Clone, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Request(String),
    #[error("search provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed search response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait WebSearch: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError>;
}

// ============================================================================
// Weather
// ============================================================================

/// Current conditions for a city
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub description: String,
    /// Degrees Celsius
    pub temperature: f64,
    /// Degrees Celsius
    pub feels_like: f64,
}

#[derive(Debug, Clone, Error)]
pub enum WeatherError {
    #[error("weather API key not configured")]
    MissingCredential,
    #[error("weather request failed: {0}")]
    Request(String),
    #[error("weather provider returned HTTP {status}")]
    Status { status: u16 },
    #[error("malformed weather response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, city: &str) -> Result<WeatherReport, WeatherError>;
}

// ============================================================================
// Safety classification
// ============================================================================

#[derive(Debug, Clone, Error)]
pub enum SafetyError {
    #[error("safety classifier unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait SafetyClassifier: Send + Sync {
    /// `Ok(true)` when the response is safe to show for this query
    async fn is_safe(&self, query: &str, response: &str) -> Result<bool, SafetyError>;
}
