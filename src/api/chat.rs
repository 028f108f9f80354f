//! Assistant chat endpoint.

use axum::{body::Bytes, extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use super::parse_body;
use crate::chat::{ChatMessage, ChatReply};
use crate::errors::{AppError, ProxyFailure};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub context: Option<Value>,
}

/// POST /ai-chat
pub async fn ai_chat(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatReply>, ProxyFailure> {
    converse(&state, &body).await.map(Json).map_err(|e| {
        tracing::error!(error = %e, "Error in ai-chat function");
        ProxyFailure(e)
    })
}

async fn converse(state: &AppState, body: &[u8]) -> Result<ChatReply, AppError> {
    let request: ChatRequest = parse_body(body)?;
    state
        .chat
        .chat(&request.messages, request.context.as_ref())
        .await
}
