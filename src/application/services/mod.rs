mod chat_service;
pub mod intercept_rules;
mod provider_gateway;

pub use chat_service::{ChatExchange, ChatReply, ChatService, ChatServiceError, ReplyRoute};
pub use provider_gateway::{
    CHAT_DEGRADED_REPLY, EMBEDDING_FAILURE_NOTE, EmbeddingOutcome, IMAGE_ANALYSIS_FALLBACK,
    ProviderError, ProviderGateway, ProviderMode, SENTIMENT_FALLBACK_EXPLANATION,
    SIMULATED_EMBEDDING_NOTE, system_prompt,
};
