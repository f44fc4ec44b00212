//! LLM provider abstraction
//!
//! One interface covers both call shapes the assistant needs: a one-shot
//! completion (routing, extraction, moderation) and a streamed generation
//! that yields text fragments.

mod error;
mod openai;
mod types;

#[cfg(test)]
mod proptests;

pub use error::LlmError;
#[cfg(test)]
pub use error::LlmErrorKind;
pub use openai::{ChatCompletionsService, GROQ_BASE_URL};
pub use types::*;

use async_trait::async_trait;
use futures::StreamExt;
use std::sync::Arc;

/// Common interface for LLM providers
#[async_trait]
pub trait LlmService: Send + Sync {
    /// Make a completion request and wait for the whole reply
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError>;

    /// Start a streamed generation. The returned stream is finite and can
    /// only be consumed once.
    async fn stream(&self, request: &LlmRequest) -> Result<TextStream, LlmError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

/// Drain a fragment stream into one string.
///
/// The first failing fragment aborts the drain; partial text is dropped.
pub async fn collect_text(mut stream: TextStream) -> Result<String, LlmError> {
    let mut buffer = String::new();
    while let Some(fragment) = stream.next().await {
        buffer.push_str(&fragment?);
    }
    Ok(buffer)
}

/// Logging wrapper for LLM services
pub struct LoggingService {
    inner: Arc<dyn LlmService>,
    model_id: String,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn LlmService>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl LlmService for LoggingService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    "LLM request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    retryable = e.kind.is_retryable(),
                    "LLM request failed"
                );
            }
        }

        result
    }

    async fn stream(&self, request: &LlmRequest) -> Result<TextStream, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.stream(request).await;

        match &result {
            Ok(_) => {
                tracing::info!(
                    model = %self.model_id,
                    first_byte_ms = %start.elapsed().as_millis(),
                    messages = request.messages.len(),
                    "LLM stream opened"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %start.elapsed().as_millis(),
                    error = %e.message,
                    retryable = e.kind.is_retryable(),
                    "LLM stream failed to open"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
