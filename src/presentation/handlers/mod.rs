mod chat;
mod conversations;
mod embedding;
mod health;
mod image;
mod models;
mod sentiment;

pub use chat::{ChatRequest, ChatResponse, chat_handler};
pub use conversations::{
    ConversationResponse, MessageResponse, conversation_messages_handler,
    list_conversations_handler,
};
pub use embedding::{EmbeddingResponse, generate_embedding_handler};
pub use health::health_handler;
pub use image::{DEFAULT_IMAGE_PROMPT, ImageAnalysisResponse, analyze_image_handler};
pub use models::models_handler;
pub use sentiment::{TextRequest, analyze_sentiment_handler};
