use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::application::ports::{ConversationRepository, RepositoryError};
use crate::domain::{Conversation, ConversationId, Message, MessageId, NewMessage};

/// Process-lifetime conversation log. Ids start at 1 and only grow; nothing
/// is ever updated or removed.
pub struct InMemoryConversationRepository {
    inner: RwLock<Tables>,
}

struct Tables {
    conversations: BTreeMap<ConversationId, Conversation>,
    messages: BTreeMap<MessageId, Message>,
    next_conversation_id: i64,
    next_message_id: i64,
}

impl Tables {
    fn take_id(counter: &mut i64, table: &str) -> Result<i64, RepositoryError> {
        let id = *counter;
        *counter = id.checked_add(1).ok_or_else(|| {
            RepositoryError::ConstraintViolation(format!("{} id space exhausted", table))
        })?;
        Ok(id)
    }
}

impl InMemoryConversationRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Tables {
                conversations: BTreeMap::new(),
                messages: BTreeMap::new(),
                next_conversation_id: 1,
                next_message_id: 1,
            }),
        }
    }
}

impl Default for InMemoryConversationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    #[instrument(skip(self))]
    async fn create_conversation(&self, title: &str) -> Result<Conversation, RepositoryError> {
        let mut tables = self.inner.write().await;
        let id = Tables::take_id(&mut tables.next_conversation_id, "conversation")?;

        let conversation = Conversation {
            id: ConversationId::from_i64(id),
            title: title.to_string(),
            created_at: Utc::now(),
        };
        tables
            .conversations
            .insert(conversation.id, conversation.clone());

        Ok(conversation)
    }

    async fn list_conversations(&self) -> Result<Vec<Conversation>, RepositoryError> {
        let tables = self.inner.read().await;
        Ok(tables.conversations.values().cloned().collect())
    }

    #[instrument(skip(self), fields(conversation_id = %id))]
    async fn get_conversation(
        &self,
        id: ConversationId,
    ) -> Result<Option<Conversation>, RepositoryError> {
        let tables = self.inner.read().await;
        Ok(tables.conversations.get(&id).cloned())
    }

    #[instrument(skip(self, message), fields(role = %message.role))]
    async fn create_message(&self, message: NewMessage) -> Result<Message, RepositoryError> {
        let mut tables = self.inner.write().await;
        let id = Tables::take_id(&mut tables.next_message_id, "message")?;

        let message = Message {
            id: MessageId::from_i64(id),
            conversation_id: message
                .conversation_id
                .unwrap_or(ConversationId::UNASSIGNED),
            role: message.role,
            content: message.content,
            model: message.model,
            created_at: Utc::now(),
        };
        tables.messages.insert(message.id, message.clone());

        Ok(message)
    }

    async fn get_message(&self, id: MessageId) -> Result<Option<Message>, RepositoryError> {
        let tables = self.inner.read().await;
        Ok(tables.messages.get(&id).cloned())
    }

    #[instrument(skip(self), fields(conversation_id = %conversation_id))]
    async fn get_messages_by_conversation(
        &self,
        conversation_id: ConversationId,
    ) -> Result<Vec<Message>, RepositoryError> {
        let tables = self.inner.read().await;
        let mut messages: Vec<Message> = tables
            .messages
            .values()
            .filter(|m| m.conversation_id == conversation_id)
            .cloned()
            .collect();

        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(messages)
    }
}
