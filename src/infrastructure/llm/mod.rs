mod openai_client;
mod openai_embedder;
mod provider_factory;
mod simulated_client;
mod simulated_embedder;

pub use openai_client::OpenAiClient;
pub use openai_embedder::OpenAiEmbedder;
pub use provider_factory::{ProviderFactory, ProviderFactoryError};
pub use simulated_client::{
    SimulatedLlmClient, simulated_image_analysis, simulated_reply, simulated_sentiment,
};
pub use simulated_embedder::{SimulatedEmbedder, pseudo_embedding};
