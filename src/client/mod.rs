//! Terminal-side chat client: the HTTP transport and the local session state
//! it drives.

mod api_client;
mod chat_session;

pub use api_client::{
    ChatApi, ChatApiReply, ClientError, EmbeddingReply, HttpChatApi, ImageAttachment,
};
pub use chat_session::{
    CONTEXT_WINDOW, ChatSession, DEFAULT_IMAGE_REQUEST, DisplayMessage, GREETING,
    IMAGE_ANALYSIS_LABEL, Sender,
};
