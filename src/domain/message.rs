use super::{ConversationId, MessageId, MessageRole};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub conversation_id: ConversationId,
    pub role: MessageRole,
    pub content: String,
    pub model: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields a caller supplies when appending a message. Id and timestamp are
/// assigned by the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMessage {
    pub conversation_id: Option<ConversationId>,
    pub role: MessageRole,
    pub content: String,
    pub model: Option<String>,
}

impl NewMessage {
    pub fn new(conversation_id: ConversationId, role: MessageRole, content: String) -> Self {
        Self {
            conversation_id: Some(conversation_id),
            role,
            content,
            model: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}
