use crate::domain::{Conversation, ConversationId, Message, MessageId, NewMessage};
use async_trait::async_trait;

use super::RepositoryError;

/// Append-only log of conversations and their messages. Implementations
/// assign ids and creation timestamps; callers never choose them.
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    async fn create_conversation(&self, title: &str) -> Result<Conversation, RepositoryError>;

    /// Conversations in insertion order.
    async fn list_conversations(&self) -> Result<Vec<Conversation>, RepositoryError>;

    async fn get_conversation(
        &self,
        id: ConversationId,
    ) -> Result<Option<Conversation>, RepositoryError>;

    async fn create_message(&self, message: NewMessage) -> Result<Message, RepositoryError>;

    async fn get_message(&self, id: MessageId) -> Result<Option<Message>, RepositoryError>;

    /// Messages of one conversation, oldest first.
    async fn get_messages_by_conversation(
        &self,
        conversation_id: ConversationId,
    ) -> Result<Vec<Message>, RepositoryError>;
}
