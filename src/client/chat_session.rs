use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{ChatTurn, MessageRole, Persona, SentimentAnalysis};

use super::api_client::{ChatApi, ClientError, ImageAttachment};

pub const GREETING: &str = "👋 Hello! I'm your AI assistant, powered by advanced language models. I can help with information, answer questions, analyze images, perform sentiment analysis, or just chat. How can I assist you today?";
pub const DEFAULT_IMAGE_REQUEST: &str = "Please analyze this image";
pub const IMAGE_ANALYSIS_LABEL: &str = "Image Analysis";

/// Number of prior messages sent along as context.
pub const CONTEXT_WINDOW: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayMessage {
    pub id: u64,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    pub model: Option<Persona>,
    pub image: Option<String>,
    pub analysis: Option<String>,
    pub sentiment: Option<SentimentAnalysis>,
}

impl DisplayMessage {
    fn new(id: u64, sender: Sender, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            sender,
            timestamp: Utc::now(),
            model: None,
            image: None,
            analysis: None,
            sentiment: None,
        }
    }
}

/// Local state of one chat window. Nothing here is shared with the server
/// except through [`ChatApi`] calls.
pub struct ChatSession {
    api: Arc<dyn ChatApi>,
    messages: Vec<DisplayMessage>,
    busy: bool,
    persona: Persona,
    pending_image: Option<ImageAttachment>,
    sentiment_enabled: bool,
    next_id: u64,
}

impl ChatSession {
    pub fn new(api: Arc<dyn ChatApi>) -> Self {
        let mut session = Self {
            api,
            messages: Vec::new(),
            busy: false,
            persona: Persona::default(),
            pending_image: None,
            sentiment_enabled: false,
            next_id: 0,
        };
        session.clear();
        session
    }

    pub fn messages(&self) -> &[DisplayMessage] {
        &self.messages
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn persona(&self) -> Persona {
        self.persona
    }

    pub fn set_persona(&mut self, persona: Persona) {
        self.persona = persona;
    }

    pub fn sentiment_enabled(&self) -> bool {
        self.sentiment_enabled
    }

    /// Flips the sentiment toggle and returns the new state.
    pub fn toggle_sentiment(&mut self) -> bool {
        self.sentiment_enabled = !self.sentiment_enabled;
        self.sentiment_enabled
    }

    pub fn attach_image(&mut self, image: ImageAttachment) {
        self.pending_image = Some(image);
    }

    pub fn pending_image(&self) -> Option<&ImageAttachment> {
        self.pending_image.as_ref()
    }

    /// Replaces the history with a single greeting.
    pub fn clear(&mut self) {
        let mut greeting = DisplayMessage::new(self.take_id(), Sender::Assistant, GREETING);
        greeting.model = Some(self.persona);
        self.messages = vec![greeting];
    }

    /// Sends user input. A pending image attachment turns the input into an
    /// image analysis request and is consumed; otherwise blank input is
    /// ignored. Returns the assistant reply that was appended, if any.
    pub async fn send(&mut self, input: &str) -> Result<Option<&DisplayMessage>, ClientError> {
        if let Some(image) = self.pending_image.take() {
            return self.send_image(image, input).await.map(Some);
        }

        if input.trim().is_empty() {
            return Ok(None);
        }

        let context = self.context_window();
        let user_message = DisplayMessage::new(self.take_id(), Sender::User, input);
        self.messages.push(user_message);

        self.busy = true;
        let outcome = self.request_reply(input, &context).await;
        self.busy = false;

        let reply = outcome?;
        self.messages.push(reply);
        Ok(self.messages.last())
    }

    async fn request_reply(
        &mut self,
        input: &str,
        context: &[ChatTurn],
    ) -> Result<DisplayMessage, ClientError> {
        let reply = self.api.chat(input, self.persona, context).await?;

        let sentiment = if self.sentiment_enabled {
            match self.api.analyze_sentiment(input).await {
                Ok(analysis) => Some(analysis),
                Err(e) => {
                    tracing::warn!(error = %e, "Sentiment analysis failed");
                    None
                }
            }
        } else {
            None
        };

        let mut message = DisplayMessage::new(self.take_id(), Sender::Assistant, reply.message);
        message.model = Some(reply.model);
        message.sentiment = sentiment;
        Ok(message)
    }

    async fn send_image(
        &mut self,
        image: ImageAttachment,
        prompt: &str,
    ) -> Result<&DisplayMessage, ClientError> {
        let request = if prompt.trim().is_empty() {
            DEFAULT_IMAGE_REQUEST
        } else {
            prompt
        };
        let mut user_message = DisplayMessage::new(self.take_id(), Sender::User, request);
        user_message.image = Some(image.file_name.clone());
        self.messages.push(user_message);

        self.busy = true;
        let outcome = self.api.analyze_image(&image, prompt).await;
        self.busy = false;

        let analysis = outcome?;
        let mut message = DisplayMessage::new(self.take_id(), Sender::Assistant, analysis);
        message.model = Some(self.persona);
        message.analysis = Some(IMAGE_ANALYSIS_LABEL.to_string());
        self.messages.push(message);

        self.messages
            .last()
            .ok_or_else(|| ClientError::InvalidResponse("no reply recorded".to_string()))
    }

    fn context_window(&self) -> Vec<ChatTurn> {
        let start = self.messages.len().saturating_sub(CONTEXT_WINDOW);
        self.messages[start..]
            .iter()
            .map(|m| {
                let role = match m.sender {
                    Sender::User => MessageRole::User,
                    Sender::Assistant => MessageRole::Assistant,
                };
                ChatTurn::new(role, m.content.clone())
            })
            .collect()
    }

    fn take_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}
