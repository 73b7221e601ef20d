use std::sync::Arc;

use crate::application::ports::ConversationRepository;
use crate::application::services::{ChatService, ProviderGateway};
use crate::infrastructure::storage::UploadStaging;
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ChatService>,
    pub gateway: Arc<ProviderGateway>,
    pub conversation_repository: Arc<dyn ConversationRepository>,
    pub upload_staging: Arc<UploadStaging>,
    pub settings: Settings,
}

impl AppState {
    /// Wires the chat service over the given gateway and store.
    pub fn new(
        gateway: Arc<ProviderGateway>,
        conversation_repository: Arc<dyn ConversationRepository>,
        upload_staging: Arc<UploadStaging>,
        settings: Settings,
    ) -> Self {
        let chat_service = Arc::new(ChatService::new(
            Arc::clone(&gateway),
            Arc::clone(&conversation_repository),
        ));

        Self {
            chat_service,
            gateway,
            conversation_repository,
            upload_staging,
            settings,
        }
    }
}
