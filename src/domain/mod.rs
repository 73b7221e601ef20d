mod chat_turn;
mod conversation;
mod conversation_id;
mod embedding;
mod message;
mod message_id;
mod message_role;
mod persona;
mod sentiment;

pub use chat_turn::ChatTurn;
pub use conversation::{Conversation, DEFAULT_CONVERSATION_TITLE};
pub use conversation_id::ConversationId;
pub use embedding::{EMBEDDING_DIMENSIONS, Embedding};
pub use message::{Message, NewMessage};
pub use message_id::MessageId;
pub use message_role::MessageRole;
pub use persona::Persona;
pub use sentiment::{NO_EXPLANATION, SentimentAnalysis, SentimentLabel};
