use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::application::ports::{ConversationRepository, RepositoryError};
use crate::domain::{
    ChatTurn, ConversationId, DEFAULT_CONVERSATION_TITLE, MessageRole, NewMessage,
    Persona,
};
use crate::infrastructure::observability::sanitize_prompt;

use super::intercept_rules;
use super::provider_gateway::{CHAT_DEGRADED_REPLY, ProviderError, ProviderGateway};

/// A chat turn as received from the client.
#[derive(Debug, Clone)]
pub struct ChatExchange {
    pub message: String,
    pub persona: Persona,
    pub context: Vec<ChatTurn>,
}

/// How a reply was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyRoute {
    Intercepted(&'static str),
    Delegated,
    Degraded,
}

#[derive(Debug, Clone)]
pub struct ChatReply {
    pub message: String,
    pub persona: Persona,
    pub route: ReplyRoute,
}

#[derive(Debug, thiserror::Error)]
pub enum ChatServiceError {
    #[error("Message is required")]
    EmptyMessage,
    #[error("internal error: {0}")]
    Internal(#[source] ProviderError),
}

/// Orchestrates one chat turn: validate, try the canned rules, delegate to the
/// provider, then record the exchange without letting storage problems reach
/// the caller.
pub struct ChatService {
    gateway: Arc<ProviderGateway>,
    conversation_repository: Arc<dyn ConversationRepository>,
    current_conversation: OnceCell<ConversationId>,
}

impl ChatService {
    pub fn new(
        gateway: Arc<ProviderGateway>,
        conversation_repository: Arc<dyn ConversationRepository>,
    ) -> Self {
        Self {
            gateway,
            conversation_repository,
            current_conversation: OnceCell::new(),
        }
    }

    #[tracing::instrument(skip(self, exchange), fields(persona = %exchange.persona, context = exchange.context.len()))]
    pub async fn respond(&self, exchange: ChatExchange) -> Result<ChatReply, ChatServiceError> {
        if exchange.message.trim().is_empty() {
            return Err(ChatServiceError::EmptyMessage);
        }

        tracing::debug!(prompt = %sanitize_prompt(&exchange.message), "Processing chat message");

        let intercepted = {
            let mut rng = rand::thread_rng();
            intercept_rules::intercept(&exchange.message, &mut rng)
        };
        if let Some(intercepted) = intercepted {
            tracing::info!(rule = intercepted.rule, "Chat message answered by intercept rule");
            return Ok(ChatReply {
                message: intercepted.reply,
                persona: exchange.persona,
                route: ReplyRoute::Intercepted(intercepted.rule),
            });
        }

        let mut history = exchange.context;
        history.push(ChatTurn::user(exchange.message.clone()));

        let (message, route) = match self
            .gateway
            .complete_chat(&history, exchange.persona)
            .await
        {
            Ok(reply) => (reply, ReplyRoute::Delegated),
            Err(e) if e.is_internal() => {
                tracing::error!(error = %e, "Chat completion failed internally");
                return Err(ChatServiceError::Internal(e));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Chat completion failed, replying with degraded message");
                (CHAT_DEGRADED_REPLY.to_string(), ReplyRoute::Degraded)
            }
        };

        if let Err(e) = self
            .record_exchange(&exchange.message, &message, exchange.persona)
            .await
        {
            tracing::warn!(error = %e, "Failed to store conversation");
        }

        Ok(ChatReply {
            message,
            persona: exchange.persona,
            route,
        })
    }

    async fn record_exchange(
        &self,
        user_message: &str,
        reply: &str,
        persona: Persona,
    ) -> Result<(), RepositoryError> {
        let conversation_id = self.current_conversation_id().await?;

        self.conversation_repository
            .create_message(NewMessage::new(
                conversation_id,
                MessageRole::User,
                user_message.to_string(),
            ))
            .await?;
        self.conversation_repository
            .create_message(
                NewMessage::new(conversation_id, MessageRole::Assistant, reply.to_string())
                    .with_model(persona.as_str()),
            )
            .await?;

        Ok(())
    }

    /// The process keeps a single implicit conversation: the first one in
    /// insertion order, created on first use.
    async fn current_conversation_id(&self) -> Result<ConversationId, RepositoryError> {
        self.current_conversation
            .get_or_try_init(|| async {
                let existing = self
                    .conversation_repository
                    .list_conversations()
                    .await?
                    .into_iter()
                    .next();
                let conversation = match existing {
                    Some(conversation) => conversation,
                    None => {
                        self.conversation_repository
                            .create_conversation(DEFAULT_CONVERSATION_TITLE)
                            .await?
                    }
                };
                tracing::info!(conversation_id = %conversation.id, "Using conversation");
                Ok::<_, RepositoryError>(conversation.id)
            })
            .await
            .copied()
    }
}
