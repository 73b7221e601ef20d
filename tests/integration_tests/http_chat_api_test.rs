use reqwest::Client;
use serde_json::json;
use wiremock::matchers::{body_json, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use parley::client::{ChatApi, ChatSession, ClientError, HttpChatApi, ImageAttachment};
use parley::domain::{ChatTurn, Persona, SentimentLabel};

fn api_for(server: &MockServer) -> HttpChatApi {
    HttpChatApi::new(Client::new(), format!("{}/", server.uri()))
}

#[tokio::test]
async fn given_message_when_chatting_then_posts_wire_format() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_json(json!({
            "message": "Hi",
            "model": "claude",
            "context": [{"role": "assistant", "content": "Welcome"}]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Hello", "model": "claude"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reply = api_for(&server)
        .chat("Hi", Persona::Claude, &[ChatTurn::assistant("Welcome")])
        .await
        .unwrap();

    assert_eq!(reply.message, "Hello");
    assert_eq!(reply.model, Persona::Claude);
}

#[tokio::test]
async fn given_error_body_when_chatting_then_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Message is required"})),
        )
        .mount(&server)
        .await;

    let result = api_for(&server).chat(" ", Persona::Gpt, &[]).await;

    match result {
        Err(ClientError::Status { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Message is required");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn given_text_when_analyzing_sentiment_then_decodes_analysis() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze-sentiment"))
        .and(body_json(json!({"text": "awful"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sentiment": "negative",
            "score": -0.2,
            "explanation": "The text contains negative language, including 1 negative indicators."
        })))
        .mount(&server)
        .await;

    let analysis = api_for(&server).analyze_sentiment("awful").await.unwrap();

    assert_eq!(analysis.sentiment, SentimentLabel::Negative);
    assert_eq!(analysis.score, -0.2);
}

#[tokio::test]
async fn given_image_when_analyzing_then_sends_multipart_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze-image"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"analysis": "A chart"})))
        .expect(1)
        .mount(&server)
        .await;

    let image = ImageAttachment {
        file_name: "chart.png".to_string(),
        bytes: vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A],
    };
    let analysis = api_for(&server).analyze_image(&image, "Summarize").await.unwrap();
    assert_eq!(analysis, "A chart");

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"image\"; filename=\"chart.png\""));
    assert!(body.contains("name=\"prompt\""));
    assert!(body.contains("Summarize"));
}

#[tokio::test]
async fn given_text_when_generating_embedding_then_keeps_note() {
    let server = MockServer::start().await;
    let values = vec![0.5_f32; 1536];
    Mock::given(method("POST"))
        .and(path("/api/generate-embedding"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "embedding": values,
            "note": "simulated"
        })))
        .mount(&server)
        .await;

    let reply = api_for(&server).generate_embedding("ferris").await.unwrap();

    assert_eq!(reply.embedding.dimensions(), 1536);
    assert_eq!(reply.note.as_deref(), Some("simulated"));
}

#[tokio::test]
async fn given_session_over_http_when_sending_then_renders_server_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "5 + 7 = 12", "model": "gpt"})),
        )
        .mount(&server)
        .await;

    let mut session = ChatSession::new(std::sync::Arc::new(api_for(&server)));
    let reply = session.send("What is 5 + 7?").await.unwrap().unwrap();

    assert_eq!(reply.content, "5 + 7 = 12");
}
