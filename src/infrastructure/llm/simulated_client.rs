//! Deterministic stand-in for the hosted provider, used when no credential is
//! configured. Every answer is picked by case-insensitive substring matching.

use async_trait::async_trait;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::{ChatTurn, MessageRole, Persona, SentimentAnalysis, SentimentLabel};

const POSITIVE_WORDS: [&str; 17] = [
    "good",
    "great",
    "excellent",
    "happy",
    "love",
    "wonderful",
    "amazing",
    "fantastic",
    "awesome",
    "best",
    "like",
    "thanks",
    "thank you",
    "nice",
    "helpful",
    "beautiful",
    "perfect",
];

const NEGATIVE_WORDS: [&str; 17] = [
    "bad",
    "terrible",
    "awful",
    "sad",
    "hate",
    "poor",
    "horrible",
    "worst",
    "angry",
    "disappointed",
    "useless",
    "stupid",
    "annoying",
    "broken",
    "fail",
    "failed",
    "waste",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Topic {
    Greeting,
    Weather,
    Name,
    Other,
}

impl Topic {
    fn detect(message: &str) -> Self {
        let lowered = message.to_lowercase();
        if lowered.contains("hello") || lowered.contains("hi") {
            Topic::Greeting
        } else if lowered.contains("weather") {
            Topic::Weather
        } else if lowered.contains("name") {
            Topic::Name
        } else {
            Topic::Other
        }
    }
}

pub fn simulated_reply(persona: Persona, message: &str) -> &'static str {
    match (persona, Topic::detect(message)) {
        (Persona::Gpt, Topic::Greeting) => {
            "Hello! I'm your GPT assistant. How can I help you today?"
        }
        (Persona::Gpt, Topic::Weather) => {
            "I can't check the actual weather without an API, but I can tell you that weather forecasts typically include temperature, precipitation chances, and wind conditions. Would you like to know more about meteorology?"
        }
        (Persona::Gpt, Topic::Name) => {
            "I'm a GPT-powered AI assistant, designed to be helpful, harmless, and honest."
        }
        (Persona::Gpt, Topic::Other) => {
            "As a GPT assistant, I'd normally process your request with the OpenAI API, but I'm currently in demo mode. In a fully functional setup, I could help with information, creative writing, problem-solving, and more."
        }
        (Persona::Claude, Topic::Greeting) => {
            "Hello there. I'm Claude. How may I assist you today?"
        }
        (Persona::Claude, Topic::Weather) => {
            "While I can't access current weather data in this demo mode, I'd be happy to discuss climate patterns or help you understand meteorological concepts. What specific aspect of weather interests you?"
        }
        (Persona::Claude, Topic::Name) => {
            "I'm Claude, an AI assistant created by Anthropic. I aim to be helpful, harmless, and honest in all my interactions."
        }
        (Persona::Claude, Topic::Other) => {
            "I'm Claude, currently running in a demonstration mode. In a fully functional environment, I could help answer your questions thoughtfully and provide nuanced perspectives on complex topics."
        }
        (Persona::Llama, Topic::Greeting) => {
            "Hey there! \u{1F44B} I'm Llama, ready to chat! What's up?"
        }
        (Persona::Llama, Topic::Weather) => {
            "Can't check the real weather right now (demo mode) \u{1F326}\u{FE0F} But I'd love to talk about something else! Any other topics on your mind? \u{1F4AD}"
        }
        (Persona::Llama, Topic::Name) => {
            "I'm Llama! \u{1F999} Your friendly neighborhood AI assistant from Meta. Nice to meet you! \u{1F60A}"
        }
        (Persona::Llama, Topic::Other) => {
            "Just FYI, I'm in demo mode right now \u{1F9EA} so I'm giving you simulated responses. In real mode, I'd be way more helpful! Anything specific you want to chat about? \u{1F4AC}"
        }
        (Persona::Gemini, Topic::Greeting) => {
            "Hello, I'm Gemini. How can I assist you today?\n\nI can help with:\n\u{2022} Information and research\n\u{2022} Creative tasks\n\u{2022} Problem-solving"
        }
        (Persona::Gemini, Topic::Weather) => {
            "I'm currently in demo mode without access to real-time weather data. However, I can explain:\n\n\u{2022} How weather forecasting works\n\u{2022} Climate patterns\n\u{2022} Weather phenomena"
        }
        (Persona::Gemini, Topic::Name) => {
            "I am Gemini, an AI assistant developed by Google. I'm designed to be:\n\n\u{2022} Helpful - providing clear and useful information\n\u{2022} Structured - organizing information logically\n\u{2022} Comprehensive - covering topics thoroughly"
        }
        (Persona::Gemini, Topic::Other) => {
            "I'm currently running in demo mode with pre-programmed responses. In a full implementation, I could provide more detailed assistance with:\n\n\u{2022} Research questions\n\u{2022} Data analysis\n\u{2022} Learning resources\n\u{2022} Creative projects"
        }
    }
}

pub fn simulated_image_analysis(image: &[u8], prompt: &str) -> &'static str {
    let prompt = prompt.to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|w| prompt.contains(w));

    if mentions(&["cat", "kitten"]) {
        "I can see a cat in this image! It appears to be a domestic cat, likely a house pet. The cat has a typical feline appearance with pointed ears, whiskers, and a distinctive cat face. Without color information in this demo mode, I can't tell you the exact coloration, but cats commonly come in tabbies, solid colors, calicos, or tuxedo patterns."
    } else if mentions(&["dog", "puppy"]) {
        "This image shows a dog! It appears to be a domestic dog, likely a pet. The dog has the characteristic canine features including a snout, floppy or pointed ears, and a friendly expression. In a full implementation with API access, I could tell you the specific breed and more details about the animal."
    } else if mentions(&["text", "read"]) {
        "This image appears to contain text. In demo mode, I can't read the specific text content, but I can see that it's formatted as writing. With a full API implementation, I would be able to extract and process the text content for you."
    } else if mentions(&["screenshot", "screen"]) {
        "This appears to be a screenshot of a digital interface. I can see what looks like a user interface with various elements such as buttons, text fields, and possibly navigation components. In a fully functional system, I could provide more details about the specific application or website shown."
    } else if mentions(&["jpeg", "jpg"]) || infer::image::is_jpeg(image) {
        "I've received your JPEG image. In this demo mode, I can acknowledge that you've uploaded an image, but cannot provide detailed analysis of its contents. With a proper API connection, I could describe the scene, identify objects, people, or text within the image."
    } else if mentions(&["png"]) || infer::image::is_png(image) {
        "I've received your PNG image. In this demo mode, I can acknowledge that you've uploaded an image, but cannot provide detailed analysis of its contents. PNG images are often used for graphics with transparency or screenshots, and with a proper API connection, I could analyze the specific content."
    } else {
        "I've received your image. In this demo mode, I can acknowledge that you've uploaded an image, but cannot provide detailed analysis without API access. In a full implementation, I would use computer vision to describe the contents, identify objects, read text, and answer specific questions about what's shown in the image."
    }
}

/// Word-list polarity: each list member contained in the text counts once.
pub fn simulated_sentiment(text: &str) -> SentimentAnalysis {
    let lowered = text.to_lowercase();
    let count = |words: &[&str]| words.iter().filter(|w| lowered.contains(*w)).count();
    let positive = count(&POSITIVE_WORDS);
    let negative = count(&NEGATIVE_WORDS);
    let magnitude = |hits: usize| (hits as f64 * 0.2).min(1.0);

    if positive > negative {
        SentimentAnalysis::new(
            SentimentLabel::Positive,
            magnitude(positive),
            format!(
                "The text contains positive language, including {} positive indicators.",
                positive
            ),
        )
    } else if negative > positive {
        SentimentAnalysis::new(
            SentimentLabel::Negative,
            -magnitude(negative),
            format!(
                "The text contains negative language, including {} negative indicators.",
                negative
            ),
        )
    } else {
        SentimentAnalysis::neutral(
            "The text appears to be neutral or balanced between positive and negative sentiment.",
        )
    }
}

pub struct SimulatedLlmClient;

#[async_trait]
impl LlmClient for SimulatedLlmClient {
    async fn complete(
        &self,
        persona: Persona,
        messages: &[ChatTurn],
    ) -> Result<String, LlmClientError> {
        let last_user_message = messages
            .iter()
            .rev()
            .find(|turn| turn.role == MessageRole::User)
            .map(|turn| turn.content.as_str())
            .unwrap_or_default();

        tracing::debug!(persona = %persona, "Using simulated chat response");
        Ok(simulated_reply(persona, last_user_message).to_string())
    }

    async fn analyze_image(&self, image: &[u8], prompt: &str) -> Result<String, LlmClientError> {
        tracing::debug!("Using simulated image analysis response");
        Ok(simulated_image_analysis(image, prompt).to_string())
    }

    async fn analyze_sentiment(&self, text: &str) -> Result<SentimentAnalysis, LlmClientError> {
        tracing::debug!("Using simulated sentiment analysis response");
        Ok(simulated_sentiment(text))
    }
}
