//! Axum route handlers for the advisor chat.

use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};

use crate::chat::replies::{reply_to, ChatMessage, Role, GREETING};
use crate::errors::AppError;
use crate::extract::AppJson;

#[derive(Debug, Deserialize)]
pub struct OpenChatQuery {
    /// Optional opening question, e.g. from a career path on the results view.
    pub topic: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatOpenResponse {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: ChatMessage,
}

/// GET /api/v1/chat
///
/// Returns the greeting; with `?topic=` the topic is asked on the user's
/// behalf and answered.
pub async fn handle_open(Query(params): Query<OpenChatQuery>) -> Json<ChatOpenResponse> {
    let mut messages = vec![ChatMessage::assistant(GREETING)];
    if let Some(topic) = params.topic.filter(|t| !t.trim().is_empty()) {
        let reply = reply_to(&topic);
        messages.push(ChatMessage {
            role: Role::User,
            content: topic,
        });
        messages.push(ChatMessage::assistant(reply));
    }
    Json(ChatOpenResponse { messages })
}

/// POST /api/v1/chat
pub async fn handle_message(
    AppJson(request): AppJson<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::BadRequest("message cannot be empty".to_string()));
    }

    Ok(Json(ChatResponse {
        reply: ChatMessage::assistant(reply_to(&request.message)),
    }))
}
