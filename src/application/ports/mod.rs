mod conversation_repository;
mod embedder;
mod llm_client;
mod repository_error;

pub use conversation_repository::ConversationRepository;
pub use embedder::{Embedder, EmbedderError};
pub use llm_client::{LlmClient, LlmClientError};
pub use repository_error::RepositoryError;
