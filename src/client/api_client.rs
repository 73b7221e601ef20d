use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::{ChatTurn, Embedding, Persona, SentimentAnalysis};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// An image picked for analysis, held in memory until sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAttachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatApiReply {
    pub message: String,
    #[serde(default)]
    pub model: Persona,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmbeddingReply {
    pub embedding: Embedding,
    #[serde(default)]
    pub note: Option<String>,
}

/// The chat server's HTTP surface as seen from a client.
#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn chat(
        &self,
        message: &str,
        persona: Persona,
        context: &[ChatTurn],
    ) -> Result<ChatApiReply, ClientError>;

    async fn analyze_sentiment(&self, text: &str) -> Result<SentimentAnalysis, ClientError>;

    async fn analyze_image(
        &self,
        image: &ImageAttachment,
        prompt: &str,
    ) -> Result<String, ClientError>;

    async fn generate_embedding(&self, text: &str) -> Result<EmbeddingReply, ClientError>;
}

pub struct HttpChatApi {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct ChatPayload<'a> {
    message: &'a str,
    model: Persona,
    context: &'a [ChatTurn],
}

#[derive(Serialize)]
struct TextPayload<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct ImageAnalysisReply {
    analysis: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl HttpChatApi {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        Self::read(response).await
    }
}

#[async_trait]
impl ChatApi for HttpChatApi {
    #[tracing::instrument(skip(self, message, context), fields(context = context.len()))]
    async fn chat(
        &self,
        message: &str,
        persona: Persona,
        context: &[ChatTurn],
    ) -> Result<ChatApiReply, ClientError> {
        self.post_json(
            "/api/chat",
            &ChatPayload {
                message,
                model: persona,
                context,
            },
        )
        .await
    }

    async fn analyze_sentiment(&self, text: &str) -> Result<SentimentAnalysis, ClientError> {
        self.post_json("/api/analyze-sentiment", &TextPayload { text })
            .await
    }

    #[tracing::instrument(skip(self, image, prompt), fields(file = %image.file_name, size = image.bytes.len()))]
    async fn analyze_image(
        &self,
        image: &ImageAttachment,
        prompt: &str,
    ) -> Result<String, ClientError> {
        let mime = infer::get(&image.bytes)
            .map(|kind| kind.mime_type())
            .unwrap_or("application/octet-stream");

        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(mime)
            .map_err(|e| ClientError::Request(e.to_string()))?;
        let form = Form::new()
            .part("image", part)
            .text("prompt", prompt.to_string());

        let response = self
            .client
            .post(self.url("/api/analyze-image"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        let reply: ImageAnalysisReply = Self::read(response).await?;
        Ok(reply.analysis)
    }

    async fn generate_embedding(&self, text: &str) -> Result<EmbeddingReply, ClientError> {
        self.post_json("/api/generate-embedding", &TextPayload { text })
            .await
    }
}
