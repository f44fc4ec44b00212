//! Mock implementations for testing
//!
//! These mocks enable exercising branches and the orchestrator without real
//! I/O. Each one returns queued or fixed results and records what it was
//! asked.

use crate::llm::{LlmError, LlmRequest, LlmResponse, LlmService, TextStream};
use crate::services::{
    SafetyClassifier, SafetyError, SearchError, SearchHit, WeatherError, WeatherProvider,
    WeatherReport, WebSearch,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

// ============================================================================
// Mock LLM
// ============================================================================

type QueuedStream = Result<Vec<Result<String, LlmError>>, LlmError>;

/// Mock LLM service with separate queues for completions and streams
pub struct MockLlm {
    model_id: String,
    completions: Mutex<VecDeque<Result<String, LlmError>>>,
    streams: Mutex<VecDeque<QueuedStream>>,
    completion_requests: Mutex<Vec<LlmRequest>>,
    stream_requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlm {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            completions: Mutex::new(VecDeque::new()),
            streams: Mutex::new(VecDeque::new()),
            completion_requests: Mutex::new(Vec::new()),
            stream_requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue the reply text (or error) for the next `complete` call
    pub fn queue_completion(&self, reply: Result<String, LlmError>) {
        self.completions.lock().unwrap().push_back(reply);
    }

    /// Queue fragments for the next `stream` call, or an error opening it
    pub fn queue_stream(&self, fragments: Result<Vec<String>, LlmError>) {
        let queued = fragments.map(|f| f.into_iter().map(Ok).collect());
        self.streams.lock().unwrap().push_back(queued);
    }

    /// Queue a stream that yields `fragments` and then fails
    pub fn queue_broken_stream(&self, fragments: Vec<String>, error: LlmError) {
        let mut items: Vec<_> = fragments.into_iter().map(Ok).collect();
        items.push(Err(error));
        self.streams.lock().unwrap().push_back(Ok(items));
    }

    pub fn recorded_completions(&self) -> Vec<LlmRequest> {
        self.completion_requests.lock().unwrap().clone()
    }

    pub fn recorded_streams(&self) -> Vec<LlmRequest> {
        self.stream_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmService for MockLlm {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.completion_requests.lock().unwrap().push(request.clone());
        self.completions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock completion queued")))
            .map(LlmResponse::from_text)
    }

    async fn stream(&self, request: &LlmRequest) -> Result<TextStream, LlmError> {
        self.stream_requests.lock().unwrap().push(request.clone());
        let items = self
            .streams
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock stream queued")))?;
        Ok(Box::pin(futures::stream::iter(items)))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

// ============================================================================
// Mock Search
// ============================================================================

/// Mock search provider returning the same result on every call
pub struct MockSearch {
    result: Result<Vec<SearchHit>, SearchError>,
    queries: Mutex<Vec<(String, usize)>>,
}

impl MockSearch {
    pub fn returning(result: Result<Vec<SearchHit>, SearchError>) -> Self {
        Self {
            result,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// `(query, max_results)` for every call
    pub fn recorded_queries(&self) -> Vec<(String, usize)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebSearch for MockSearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        self.queries
            .lock()
            .unwrap()
            .push((query.to_string(), max_results));
        self.result.clone()
    }
}

// ============================================================================
// Mock Weather
// ============================================================================

pub struct MockWeather {
    result: Result<WeatherReport, WeatherError>,
    cities: Mutex<Vec<String>>,
}

impl MockWeather {
    pub fn returning(result: Result<WeatherReport, WeatherError>) -> Self {
        Self {
            result,
            cities: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded_cities(&self) -> Vec<String> {
        self.cities.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherProvider for MockWeather {
    async fn current(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        self.cities.lock().unwrap().push(city.to_string());
        self.result.clone()
    }
}

// ============================================================================
// Mock Safety
// ============================================================================

pub struct MockSafety {
    result: Result<bool, SafetyError>,
    pairs: Mutex<Vec<(String, String)>>,
}

impl MockSafety {
    pub fn returning(result: Result<bool, SafetyError>) -> Self {
        Self {
            result,
            pairs: Mutex::new(Vec::new()),
        }
    }

    /// `(query, response)` for every call
    pub fn recorded_pairs(&self) -> Vec<(String, String)> {
        self.pairs.lock().unwrap().clone()
    }
}

#[async_trait]
impl SafetyClassifier for MockSafety {
    async fn is_safe(&self, query: &str, response: &str) -> Result<bool, SafetyError> {
        self.pairs
            .lock()
            .unwrap()
            .push((query.to_string(), response.to_string()));
        self.result.clone()
    }
}
