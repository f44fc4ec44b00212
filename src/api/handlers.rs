//! HTTP request handlers

use super::types::{
    ChatRequest, ChatResponse, ConversationResponse, CreateConversationRequest, ErrorResponse,
    SuccessResponse,
};
use super::AppState;
use crate::conversation::Conversation;
use crate::runtime::OrchestratorError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Conversation creation, optionally restoring prior turns
        .route("/api/conversations/new", post(create_conversation))
        // Transcript retrieval
        .route("/api/conversations/:id", get(get_conversation))
        // Session end
        .route("/api/conversations/:id/delete", post(delete_conversation))
        // One user message, one assistant turn
        .route("/api/conversations/:id/chat", post(send_chat))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Conversations
// ============================================================

async fn create_conversation(
    State(state): State<AppState>,
    Json(req): Json<CreateConversationRequest>,
) -> Json<ConversationResponse> {
    let conversation = Conversation::restore(req.turns);
    let turns = conversation.turns().to_vec();
    let id = state.sessions.insert(conversation).await;
    tracing::info!(conv_id = %id, restored_turns = turns.len(), "Created conversation");

    Json(ConversationResponse { id, turns })
}

async fn get_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ConversationResponse>, AppError> {
    let session = state
        .sessions
        .get(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Conversation not found: {id}")))?;

    let turns = session.lock().await.turns().to_vec();
    Ok(Json(ConversationResponse { id, turns }))
}

async fn delete_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    let session = state
        .sessions
        .get(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Conversation not found: {id}")))?;

    // A conversation with a cycle in flight is not discarded under it
    let _idle = session.try_lock().map_err(|_| {
        AppError::Conflict("A response is still being generated for this conversation".to_string())
    })?;

    state.sessions.remove(&id).await;
    tracing::info!(conv_id = %id, "Deleted conversation");

    Ok(Json(SuccessResponse { success: true }))
}

// ============================================================
// Chat
// ============================================================

async fn send_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let session = state
        .sessions
        .get(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Conversation not found: {id}")))?;

    // At most one cycle per conversation
    let mut conversation = session.try_lock().map_err(|_| {
        AppError::Conflict("A response is already being generated for this conversation".to_string())
    })?;

    let outcome = state
        .orchestrator
        .respond_to(&mut conversation, &req.text)
        .await?;

    Ok(Json(ChatResponse {
        turn: outcome.turn,
        intent: outcome.label,
        replaced: outcome.replaced,
    }))
}

async fn get_version() -> &'static str {
    concat!("gram-sahayak ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl From<OrchestratorError> for AppError {
    fn from(e: OrchestratorError) -> Self {
        match e {
            OrchestratorError::InvalidUserTurn(_) => AppError::BadRequest(e.to_string()),
            OrchestratorError::NoPendingUserTurn | OrchestratorError::Transition(_) => {
                tracing::error!(error = %e, "Cycle failed");
                AppError::Internal(e.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
