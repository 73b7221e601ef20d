use axum::Json;
use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Conversation, ConversationId, Message, MessageId, MessageRole};
use crate::presentation::error::ApiError;
use crate::presentation::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationResponse {
    pub id: ConversationId,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: MessageId,
    pub conversation_id: ConversationId,
    pub role: MessageRole,
    pub content: String,
    pub model: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ConversationsResponse {
    pub conversations: Vec<ConversationResponse>,
}

#[derive(Debug, Serialize)]
pub struct MessagesResponse {
    pub messages: Vec<MessageResponse>,
}

impl From<Conversation> for ConversationResponse {
    fn from(conversation: Conversation) -> Self {
        Self {
            id: conversation.id,
            title: conversation.title,
            created_at: conversation.created_at,
        }
    }
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            conversation_id: message.conversation_id,
            role: message.role,
            content: message.content,
            model: message.model,
            created_at: message.created_at,
        }
    }
}

pub async fn list_conversations_handler(
    State(state): State<AppState>,
) -> Result<Json<ConversationsResponse>, ApiError> {
    let conversations = state
        .conversation_repository
        .list_conversations()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to list conversations");
            ApiError::Internal("Failed to list conversations".to_string())
        })?;

    Ok(Json(ConversationsResponse {
        conversations: conversations.into_iter().map(Into::into).collect(),
    }))
}

#[tracing::instrument(skip(state))]
pub async fn conversation_messages_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessagesResponse>, ApiError> {
    let id = ConversationId::from_i64(id);
    let repository = &state.conversation_repository;

    let lookup = repository.get_conversation(id).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to load conversation");
        ApiError::Internal("Failed to load conversation".to_string())
    })?;
    if lookup.is_none() {
        return Err(ApiError::NotFound(format!("Conversation {} not found", id)));
    }

    let messages = repository
        .get_messages_by_conversation(id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to load messages");
            ApiError::Internal("Failed to load messages".to_string())
        })?;

    Ok(Json(MessagesResponse {
        messages: messages.into_iter().map(Into::into).collect(),
    }))
}
