use reqwest::Client;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use parley::application::ports::{Embedder, EmbedderError};
use parley::infrastructure::llm::OpenAiEmbedder;

fn embedder_for(server: &MockServer) -> OpenAiEmbedder {
    OpenAiEmbedder::new(
        Client::new(),
        "sk-test".to_string(),
        &server.uri(),
        "text-embedding-3-small".to_string(),
    )
}

#[tokio::test]
async fn given_text_when_embedding_then_returns_first_vector() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .and(body_json(json!({
            "input": "ferris",
            "model": "text-embedding-3-small",
            "encoding_format": "float"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"embedding": [0.25, -0.5, 1.0], "index": 0}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let embedding = embedder_for(&server).embed("ferris").await.unwrap();

    assert_eq!(embedding.values, vec![0.25, -0.5, 1.0]);
}

#[tokio::test]
async fn given_rate_limit_when_embedding_then_returns_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let result = embedder_for(&server).embed("ferris").await;

    assert!(matches!(result, Err(EmbedderError::RateLimited)));
}

#[tokio::test]
async fn given_empty_data_when_embedding_then_returns_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let result = embedder_for(&server).embed("ferris").await;

    assert!(matches!(result, Err(EmbedderError::InvalidResponse(_))));
}
