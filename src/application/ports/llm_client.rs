use async_trait::async_trait;

use crate::domain::{ChatTurn, Persona, SentimentAnalysis};

/// Text and vision capabilities of a chat-completion provider.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Completes a conversation. `messages` already carries the persona's
    /// system instruction as its first entry.
    async fn complete(
        &self,
        persona: Persona,
        messages: &[ChatTurn],
    ) -> Result<String, LlmClientError>;

    async fn analyze_image(&self, image: &[u8], prompt: &str) -> Result<String, LlmClientError>;

    async fn analyze_sentiment(&self, text: &str) -> Result<SentimentAnalysis, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("client misconfigured: {0}")]
    Configuration(String),
}
