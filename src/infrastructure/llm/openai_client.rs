use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::{ChatTurn, Persona, SentimentAnalysis};
use crate::presentation::config::ProviderSettings;

const EMPTY_COMPLETION: &str = "Sorry, I couldn't generate a response.";
const EMPTY_IMAGE_ANALYSIS: &str = "I couldn't analyze this image.";
const SENTIMENT_INSTRUCTION: &str = "You are a sentiment analysis expert. Analyze the sentiment of the text and provide a rating from -1 (very negative) to 1 (very positive), with 0 being neutral. Also provide a brief explanation of your rating. Respond with JSON in this format: { \"sentiment\": \"positive\"|\"negative\"|\"neutral\", \"score\": number, \"explanation\": string }";

/// Chat-completions client for OpenAI-compatible endpoints.
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    image_max_tokens: u32,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<RequestMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct RequestMessage {
    role: &'static str,
    content: MessageContent,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    r#type: &'static str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(client: Client, api_key: String, settings: &ProviderSettings) -> Self {
        Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: settings.chat_model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            image_max_tokens: settings.image_max_tokens,
        }
    }

    /// Sends one completion request and returns the first choice's text, or
    /// `None` when the provider answered with empty content.
    async fn send(
        &self,
        request_body: &ChatCompletionRequest<'_>,
    ) -> Result<Option<String>, LlmClientError> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    LlmClientError::Configuration(e.to_string())
                } else {
                    LlmClientError::ApiRequestFailed(e.to_string())
                }
            })?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmClientError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let completion_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        completion_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.filter(|c| !c.trim().is_empty()))
            .ok_or_else(|| LlmClientError::InvalidResponse("empty choices".to_string()))
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(
        &self,
        _persona: Persona,
        messages: &[ChatTurn],
    ) -> Result<String, LlmClientError> {
        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|turn| RequestMessage {
                    role: turn.role.as_str(),
                    content: MessageContent::Text(turn.content.clone()),
                })
                .collect(),
            temperature: Some(self.temperature),
            max_tokens: Some(self.max_tokens),
            response_format: None,
        };

        let content = self.send(&request_body).await?;
        Ok(content.unwrap_or_else(|| EMPTY_COMPLETION.to_string()))
    }

    async fn analyze_image(&self, image: &[u8], prompt: &str) -> Result<String, LlmClientError> {
        let mime = infer::get(image)
            .map(|kind| kind.mime_type())
            .filter(|mime| mime.starts_with("image/"))
            .unwrap_or("image/jpeg");
        let data_url = format!("data:{};base64,{}", mime, STANDARD.encode(image));

        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![RequestMessage {
                role: "user",
                content: MessageContent::Parts(vec![
                    ContentPart::Text {
                        text: prompt.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url: data_url },
                    },
                ]),
            }],
            temperature: None,
            max_tokens: Some(self.image_max_tokens),
            response_format: None,
        };

        let content = self.send(&request_body).await?;
        Ok(content.unwrap_or_else(|| EMPTY_IMAGE_ANALYSIS.to_string()))
    }

    async fn analyze_sentiment(&self, text: &str) -> Result<SentimentAnalysis, LlmClientError> {
        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                RequestMessage {
                    role: "system",
                    content: MessageContent::Text(SENTIMENT_INSTRUCTION.to_string()),
                },
                RequestMessage {
                    role: "user",
                    content: MessageContent::Text(text.to_string()),
                },
            ],
            temperature: None,
            max_tokens: None,
            response_format: Some(ResponseFormat {
                r#type: "json_object",
            }),
        };

        let content = self.send(&request_body).await?.unwrap_or_default();
        Ok(SentimentAnalysis::from_payload(&content))
    }
}
