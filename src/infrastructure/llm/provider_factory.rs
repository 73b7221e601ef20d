use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::application::services::{ProviderGateway, ProviderMode};
use crate::presentation::config::ProviderSettings;

use super::{OpenAiClient, OpenAiEmbedder, SimulatedEmbedder, SimulatedLlmClient};

pub struct ProviderFactory;

#[derive(Debug, thiserror::Error)]
pub enum ProviderFactoryError {
    #[error("http client initialization failed: {0}")]
    HttpClient(String),
}

impl ProviderFactory {
    /// Chooses live or simulated adapters once, from the configured
    /// credential. A blank key counts as absent.
    pub fn create(settings: &ProviderSettings) -> Result<ProviderGateway, ProviderFactoryError> {
        let api_key = settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty());

        match api_key {
            Some(key) => {
                let client = Client::builder()
                    .timeout(Duration::from_secs(settings.request_timeout_secs))
                    .build()
                    .map_err(|e| ProviderFactoryError::HttpClient(e.to_string()))?;

                tracing::info!(
                    base_url = %settings.base_url,
                    chat_model = %settings.chat_model,
                    embedding_model = %settings.embedding_model,
                    "Using live provider"
                );

                let llm_client = OpenAiClient::new(client.clone(), key.to_string(), settings);
                let embedder = OpenAiEmbedder::new(
                    client,
                    key.to_string(),
                    &settings.base_url,
                    settings.embedding_model.clone(),
                );
                Ok(ProviderGateway::new(
                    Arc::new(llm_client),
                    Arc::new(embedder),
                    ProviderMode::Live,
                ))
            }
            None => {
                tracing::warn!("No provider credential configured, using simulated responses");
                Ok(ProviderGateway::new(
                    Arc::new(SimulatedLlmClient),
                    Arc::new(SimulatedEmbedder),
                    ProviderMode::Simulated,
                ))
            }
        }
    }
}
