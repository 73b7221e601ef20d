use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};

use crate::application::services::{ChatExchange, ChatServiceError};
use crate::domain::{ChatTurn, Persona};
use crate::presentation::error::ApiError;
use crate::presentation::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub context: Vec<ChatTurn>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
    pub model: String,
}

#[tracing::instrument(skip(state, payload))]
pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload?;

    let exchange = ChatExchange {
        message: request.message,
        persona: Persona::from_model_id(request.model.as_deref()),
        context: request.context,
    };

    match state.chat_service.respond(exchange).await {
        Ok(reply) => {
            tracing::debug!(route = ?reply.route, "Chat reply ready");
            Ok(Json(ChatResponse {
                message: reply.message,
                model: reply.persona.as_str().to_string(),
            }))
        }
        Err(ChatServiceError::EmptyMessage) => {
            tracing::warn!("Chat request with empty message");
            Err(ApiError::Validation(ChatServiceError::EmptyMessage.to_string()))
        }
        Err(e @ ChatServiceError::Internal(_)) => {
            tracing::error!(error = %e, "Chat request failed");
            Err(ApiError::Internal("Failed to generate AI response".to_string()))
        }
    }
}
