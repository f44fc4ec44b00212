//! `OpenAI`-compatible chat-completions provider (Groq speaks this dialect)

use super::types::{LlmRequest, LlmResponse, TextStream, Usage};
use super::{LlmError, LlmService};
use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures::{future, Stream, StreamExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default endpoint root for Groq's `OpenAI`-compatible API
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Chat-completions service for a single model
pub struct ChatCompletionsService {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl ChatCompletionsService {
    pub fn new(api_key: impl Into<String>, base_url: &str, model: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: api_key.into(),
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model: model.into(),
        }
    }

    pub(super) fn translate_request(&self, request: &LlmRequest, stream: bool) -> ChatRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);

        if let Some(system) = &request.system {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }

        messages.extend(request.messages.iter().map(|msg| ChatMessage {
            role: msg.role.as_str().to_string(),
            content: msg.content.clone(),
        }));

        ChatRequest {
            model: self.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            stream,
        }
    }

    async fn send(&self, body: &ChatRequest) -> Result<reqwest::Response, LlmError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| LlmError::from_transport(&e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .map_err(|e| LlmError::network(format!("Failed to read response: {e}")))?;

        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|resp| resp.error.message)
            .unwrap_or(body);
        Err(LlmError::from_status(status.as_u16(), &message))
    }

    pub(super) fn normalize_response(resp: ChatResponse) -> Result<LlmResponse, LlmError> {
        let choice = resp
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::unknown("No choices in response"))?;

        let usage = resp.usage.map_or_else(Usage::default, |u| Usage {
            input_tokens: u64::from(u.prompt_tokens),
            output_tokens: u64::from(u.completion_tokens),
        });

        Ok(LlmResponse {
            text: choice.message.content.unwrap_or_default(),
            usage,
        })
    }
}

/// One decoded server-sent event from a streamed completion
#[derive(Debug, PartialEq, Eq)]
pub(super) enum StreamChunk {
    Text(String),
    /// Keep-alive, role-only delta or empty content
    Skip,
    Done,
}

pub(super) fn parse_stream_data(data: &str) -> Result<StreamChunk, LlmError> {
    if data.trim() == "[DONE]" {
        return Ok(StreamChunk::Done);
    }

    let chunk: StreamResponse = serde_json::from_str(data)
        .map_err(|e| LlmError::unknown(format!("SSE parsing error: {e}, data: {data}")))?;

    if let Some(error) = chunk.error {
        return Err(LlmError::server_error(format!("SSE API error: {}", error.message)));
    }

    let text = chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content)
        .unwrap_or_default();

    if text.is_empty() {
        Ok(StreamChunk::Skip)
    } else {
        Ok(StreamChunk::Text(text))
    }
}

/// Decode a raw SSE byte stream into text fragments.
///
/// Ends at `[DONE]` (anything after it is ignored) or when the body ends.
/// Keep-alives and role-only deltas are dropped; an in-band API error or a
/// transport failure surfaces as an `Err` item.
pub(super) fn text_stream<S, B, E>(bytes: S) -> TextStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + 'static,
    E: std::fmt::Display + 'static,
{
    let fragments = bytes
        .eventsource()
        .map(|event| match event {
            Ok(event) => parse_stream_data(&event.data),
            Err(e) => Err(LlmError::network(format!("SSE stream error: {e}"))),
        })
        .take_while(|chunk| future::ready(!matches!(chunk, Ok(StreamChunk::Done))))
        .filter_map(|chunk| {
            future::ready(match chunk {
                Ok(StreamChunk::Text(text)) => Some(Ok(text)),
                Ok(StreamChunk::Skip | StreamChunk::Done) => None,
                Err(e) => Some(Err(e)),
            })
        });

    Box::pin(fragments)
}

#[async_trait]
impl LlmService for ChatCompletionsService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let body = self.translate_request(request, false);
        let response = self.send(&body).await?;

        let text = response
            .text()
            .await
            .map_err(|e| LlmError::network(format!("Failed to read response: {e}")))?;
        let parsed: ChatResponse = serde_json::from_str(&text).map_err(|e| {
            LlmError::unknown(format!("Failed to parse response: {e} - body: {text}"))
        })?;

        Self::normalize_response(parsed)
    }

    async fn stream(&self, request: &LlmRequest) -> Result<TextStream, LlmError> {
        let body = self.translate_request(request, true);
        let response = self.send(&body).await?;

        Ok(text_stream(response.bytes_stream()))
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// Wire types

#[derive(Debug, Serialize)]
pub(super) struct ChatRequest {
    pub(super) model: String,
    pub(super) messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) temperature: Option<f32>,
    pub(super) stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct ChatMessage {
    pub(super) role: String,
    pub(super) content: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatResponse {
    pub(super) choices: Vec<ChatChoice>,
    #[serde(default)]
    pub(super) usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatChoice {
    pub(super) message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChoiceMessage {
    #[serde(default)]
    pub(super) content: Option<String>,
}

#[derive(Debug, Deserialize)]
#[allow(clippy::struct_field_names)]
pub(super) struct ChatUsage {
    pub(super) prompt_tokens: u32,
    pub(super) completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct StreamResponse {
    #[serde(default)]
    choices: Vec<StreamChoice>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: StreamDelta,
}

#[derive(Debug, Default, Deserialize)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}
