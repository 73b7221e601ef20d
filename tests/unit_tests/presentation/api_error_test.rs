use axum::http::StatusCode;
use axum::response::IntoResponse;

use parley::presentation::ApiError;

#[test]
fn given_each_error_kind_when_mapped_then_uses_matching_status() {
    let cases = [
        (ApiError::Validation("bad".into()), StatusCode::BAD_REQUEST),
        (ApiError::NotFound("gone".into()), StatusCode::NOT_FOUND),
        (ApiError::PayloadTooLarge("big".into()), StatusCode::PAYLOAD_TOO_LARGE),
        (ApiError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (error, status) in cases {
        assert_eq!(error.status(), status);
    }
}

#[tokio::test]
async fn given_api_error_when_rendered_then_body_carries_message() {
    let response = ApiError::Validation("Text is required".into()).into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, serde_json::json!({"message": "Text is required"}));
}
