use std::fmt;
use std::sync::Arc;

use crate::application::ports::{Embedder, LlmClient, LlmClientError};
use crate::domain::{
    ChatTurn, EMBEDDING_DIMENSIONS, Embedding, Persona, SentimentAnalysis,
};

pub const CHAT_DEGRADED_REPLY: &str =
    "I encountered an error processing your request. Please check your OpenAI API key and try again.";
pub const IMAGE_ANALYSIS_FALLBACK: &str =
    "I encountered an error analyzing this image. Please check your OpenAI API key.";
pub const SENTIMENT_FALLBACK_EXPLANATION: &str = "An error occurred while analyzing sentiment.";
pub const EMBEDDING_FAILURE_NOTE: &str = "Error occurred during embedding generation";
pub const SIMULATED_EMBEDDING_NOTE: &str =
    "Deterministic simulated embedding; no provider credential is configured";

/// Persona instruction prepended to every delegated conversation.
pub fn system_prompt(persona: Persona) -> &'static str {
    match persona {
        Persona::Gpt => {
            "You are an AI assistant powered by GPT-4o. Please provide helpful, accurate, and ethical responses."
        }
        Persona::Claude => {
            "You are Claude 3 Opus, an AI assistant created by Anthropic. Please respond in a helpful, harmless, and honest manner."
        }
        Persona::Llama => {
            "You are Llama 3, an AI assistant created by Meta. Please respond in a concise, straightforward style with occasional emojis."
        }
        Persona::Gemini => {
            "You are Gemini Pro, an AI assistant created by Google. Please respond with clear, well-structured information and occasional use of bullet points."
        }
    }
}

/// Whether the gateway talks to the hosted provider or to the local
/// simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderMode {
    Live,
    Simulated,
}

impl ProviderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderMode::Live => "live",
            ProviderMode::Simulated => "simulated",
        }
    }
}

impl fmt::Display for ProviderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingOutcome {
    pub embedding: Embedding,
    pub note: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("completion: {0}")]
    Completion(#[from] LlmClientError),
}

impl ProviderError {
    /// True when the failure comes from our own setup rather than from the
    /// upstream service.
    pub fn is_internal(&self) -> bool {
        matches!(self, ProviderError::Completion(LlmClientError::Configuration(_)))
    }
}

pub struct ProviderGateway {
    llm_client: Arc<dyn LlmClient>,
    embedder: Arc<dyn Embedder>,
    mode: ProviderMode,
}

impl ProviderGateway {
    pub fn new(
        llm_client: Arc<dyn LlmClient>,
        embedder: Arc<dyn Embedder>,
        mode: ProviderMode,
    ) -> Self {
        Self {
            llm_client,
            embedder,
            mode,
        }
    }

    pub fn mode(&self) -> ProviderMode {
        self.mode
    }

    #[tracing::instrument(skip(self, messages), fields(persona = %persona, turns = messages.len()))]
    pub async fn complete_chat(
        &self,
        messages: &[ChatTurn],
        persona: Persona,
    ) -> Result<String, ProviderError> {
        let mut request = Vec::with_capacity(messages.len() + 1);
        request.push(ChatTurn::system(system_prompt(persona)));
        request.extend_from_slice(messages);

        let reply = self.llm_client.complete(persona, &request).await?;
        Ok(reply)
    }

    #[tracing::instrument(skip(self, image, prompt), fields(bytes = image.len()))]
    pub async fn analyze_image(&self, image: &[u8], prompt: &str) -> Result<String, ProviderError> {
        let analysis = self.llm_client.analyze_image(image, prompt).await?;
        Ok(analysis)
    }

    #[tracing::instrument(skip(self, text), fields(chars = text.chars().count()))]
    pub async fn analyze_sentiment(&self, text: &str) -> Result<SentimentAnalysis, ProviderError> {
        let analysis = self.llm_client.analyze_sentiment(text).await?;
        Ok(analysis)
    }

    /// Never fails: provider errors and malformed vectors degrade to the
    /// all-zero embedding with an explanatory note.
    #[tracing::instrument(skip(self, text), fields(chars = text.chars().count()))]
    pub async fn generate_embedding(&self, text: &str) -> EmbeddingOutcome {
        match self.embedder.embed(text).await {
            Ok(embedding) if embedding.dimensions() == EMBEDDING_DIMENSIONS => EmbeddingOutcome {
                embedding,
                note: (self.mode == ProviderMode::Simulated)
                    .then(|| SIMULATED_EMBEDDING_NOTE.to_string()),
            },
            Ok(embedding) => {
                tracing::warn!(
                    dimensions = embedding.dimensions(),
                    expected = EMBEDDING_DIMENSIONS,
                    "Embedding has unexpected width, substituting zero vector"
                );
                EmbeddingOutcome {
                    embedding: Embedding::zeros(),
                    note: Some(EMBEDDING_FAILURE_NOTE.to_string()),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Embedding generation failed, substituting zero vector");
                EmbeddingOutcome {
                    embedding: Embedding::zeros(),
                    note: Some(EMBEDDING_FAILURE_NOTE.to_string()),
                }
            }
        }
    }
}
