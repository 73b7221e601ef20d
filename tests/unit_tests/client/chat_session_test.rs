use std::sync::{Arc, Mutex};

use parley::client::{
    CONTEXT_WINDOW, ChatApi, ChatApiReply, ChatSession, ClientError, DEFAULT_IMAGE_REQUEST,
    EmbeddingReply, GREETING, IMAGE_ANALYSIS_LABEL, ImageAttachment, Sender,
};
use parley::domain::{ChatTurn, Embedding, MessageRole, Persona, SentimentAnalysis, SentimentLabel};

/// Scripted transport that records what the session sent.
#[derive(Default)]
struct ScriptedApi {
    fail_chat: bool,
    fail_sentiment: bool,
    echoed_model: Option<Persona>,
    chat_calls: Mutex<Vec<(String, Persona, Vec<ChatTurn>)>>,
    sentiment_calls: Mutex<Vec<String>>,
    image_calls: Mutex<Vec<(String, String)>>,
}

#[async_trait::async_trait]
impl ChatApi for ScriptedApi {
    async fn chat(
        &self,
        message: &str,
        persona: Persona,
        context: &[ChatTurn],
    ) -> Result<ChatApiReply, ClientError> {
        self.chat_calls
            .lock()
            .unwrap()
            .push((message.to_string(), persona, context.to_vec()));
        if self.fail_chat {
            return Err(ClientError::Request("connection refused".to_string()));
        }
        Ok(ChatApiReply {
            message: format!("echo: {message}"),
            model: self.echoed_model.unwrap_or(persona),
        })
    }

    async fn analyze_sentiment(&self, text: &str) -> Result<SentimentAnalysis, ClientError> {
        self.sentiment_calls.lock().unwrap().push(text.to_string());
        if self.fail_sentiment {
            return Err(ClientError::Status {
                status: 500,
                message: "down".to_string(),
            });
        }
        Ok(SentimentAnalysis::new(SentimentLabel::Positive, 0.6, "upbeat"))
    }

    async fn analyze_image(
        &self,
        image: &ImageAttachment,
        prompt: &str,
    ) -> Result<String, ClientError> {
        self.image_calls
            .lock()
            .unwrap()
            .push((image.file_name.clone(), prompt.to_string()));
        Ok("a diagram".to_string())
    }

    async fn generate_embedding(&self, _: &str) -> Result<EmbeddingReply, ClientError> {
        Ok(EmbeddingReply {
            embedding: Embedding::zeros(),
            note: None,
        })
    }
}

fn session_with(api: ScriptedApi) -> (Arc<ScriptedApi>, ChatSession) {
    let api = Arc::new(api);
    let session = ChatSession::new(api.clone());
    (api, session)
}

fn attachment() -> ImageAttachment {
    ImageAttachment {
        file_name: "diagram.png".to_string(),
        bytes: vec![0x89, 0x50, 0x4E, 0x47],
    }
}

#[test]
fn given_new_session_then_shows_only_greeting() {
    let (_, session) = session_with(ScriptedApi::default());

    assert_eq!(session.messages().len(), 1);
    assert_eq!(session.messages()[0].content, GREETING);
    assert_eq!(session.messages()[0].sender, Sender::Assistant);
    assert!(!session.is_busy());
    assert_eq!(session.persona(), Persona::Gpt);
}

#[tokio::test]
async fn given_blank_input_when_sending_then_nothing_happens() {
    let (api, mut session) = session_with(ScriptedApi::default());

    let reply = session.send("   ").await.unwrap();

    assert!(reply.is_none());
    assert_eq!(session.messages().len(), 1);
    assert!(api.chat_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn given_server_echoes_other_model_when_sending_then_reply_is_tagged_with_echoed_model() {
    let (api, mut session) = session_with(ScriptedApi {
        echoed_model: Some(Persona::Gpt),
        ..ScriptedApi::default()
    });
    session.set_persona(Persona::Gemini);

    let reply = session.send("hi").await.unwrap().unwrap().clone();

    assert_eq!(api.chat_calls.lock().unwrap()[0].1, Persona::Gemini);
    assert_eq!(reply.model, Some(Persona::Gpt));
    assert_eq!(session.persona(), Persona::Gemini);
}

#[tokio::test]
async fn given_input_when_sending_then_appends_user_and_reply_with_prior_context() {
    let (api, mut session) = session_with(ScriptedApi::default());
    session.set_persona(Persona::Llama);

    let reply = session.send("hi").await.unwrap().unwrap().clone();

    assert_eq!(reply.content, "echo: hi");
    assert_eq!(reply.model, Some(Persona::Llama));
    let messages = session.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].sender, Sender::User);
    assert_eq!(messages[1].content, "hi");
    assert!(!session.is_busy());

    let calls = api.chat_calls.lock().unwrap();
    let (message, persona, context) = &calls[0];
    assert_eq!(message, "hi");
    assert_eq!(*persona, Persona::Llama);
    assert_eq!(context, &vec![ChatTurn::new(MessageRole::Assistant, GREETING)]);
}

#[tokio::test]
async fn given_long_history_when_sending_then_context_is_capped() {
    let (api, mut session) = session_with(ScriptedApi::default());

    for i in 0..8 {
        session.send(&format!("message {i}")).await.unwrap();
    }

    let calls = api.chat_calls.lock().unwrap();
    let (_, _, context) = calls.last().unwrap();
    assert_eq!(context.len(), CONTEXT_WINDOW);
    assert_eq!(context.last().unwrap().content, "echo: message 6");
    assert_eq!(context[context.len() - 2].role, MessageRole::User);
}

#[tokio::test]
async fn given_failing_transport_when_sending_then_error_is_returned_and_busy_cleared() {
    let (_, mut session) = session_with(ScriptedApi {
        fail_chat: true,
        ..ScriptedApi::default()
    });

    let result = session.send("hello").await;

    assert!(result.is_err());
    assert!(!session.is_busy());
    assert_eq!(session.messages().len(), 2);
    assert_eq!(session.messages()[1].sender, Sender::User);
}

#[tokio::test]
async fn given_sentiment_toggle_when_sending_then_reply_carries_analysis() {
    let (api, mut session) = session_with(ScriptedApi::default());
    assert!(session.toggle_sentiment());

    let reply = session.send("great work").await.unwrap().unwrap().clone();

    assert_eq!(reply.sentiment.unwrap().sentiment, SentimentLabel::Positive);
    assert_eq!(api.sentiment_calls.lock().unwrap().as_slice(), ["great work"]);
}

#[tokio::test]
async fn given_failing_sentiment_when_sending_then_reply_still_arrives() {
    let (_, mut session) = session_with(ScriptedApi {
        fail_sentiment: true,
        ..ScriptedApi::default()
    });
    session.toggle_sentiment();

    let reply = session.send("great work").await.unwrap().unwrap().clone();

    assert_eq!(reply.content, "echo: great work");
    assert!(reply.sentiment.is_none());
}

#[tokio::test]
async fn given_pending_image_when_sending_then_routes_to_image_analysis_once() {
    let (api, mut session) = session_with(ScriptedApi::default());
    session.attach_image(attachment());

    let reply = session.send("").await.unwrap().unwrap().clone();

    assert_eq!(reply.content, "a diagram");
    assert_eq!(reply.analysis.as_deref(), Some(IMAGE_ANALYSIS_LABEL));
    assert_eq!(session.messages()[1].content, DEFAULT_IMAGE_REQUEST);
    assert_eq!(session.messages()[1].image.as_deref(), Some("diagram.png"));
    assert!(session.pending_image().is_none());
    assert!(api.chat_calls.lock().unwrap().is_empty());

    session.send("and now text").await.unwrap();
    assert_eq!(api.image_calls.lock().unwrap().len(), 1);
    assert_eq!(api.chat_calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn given_any_history_when_clearing_then_only_greeting_remains() {
    let (_, mut session) = session_with(ScriptedApi::default());
    session.send("one").await.unwrap();
    session.attach_image(attachment());
    session.send("two").await.unwrap();

    session.clear();

    assert_eq!(session.messages().len(), 1);
    assert_eq!(session.messages()[0].content, GREETING);
    assert_eq!(session.messages()[0].sender, Sender::Assistant);
}
