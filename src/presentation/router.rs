use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::config::CorsSettings;
use crate::presentation::handlers::{
    analyze_image_handler, analyze_sentiment_handler, chat_handler,
    conversation_messages_handler, generate_embedding_handler, health_handler,
    list_conversations_handler, models_handler,
};
use crate::presentation::state::AppState;

/// Room for multipart boundaries and the prompt field on top of the file
/// itself. The staging layer enforces the exact file ceiling.
const MULTIPART_ENVELOPE_BYTES: usize = 64 * 1024;

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.settings.cors);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let upload_limit = state
        .upload_staging
        .max_bytes()
        .saturating_add(MULTIPART_ENVELOPE_BYTES);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/models", get(models_handler))
        .route("/api/chat", post(chat_handler))
        .route(
            "/api/analyze-image",
            post(analyze_image_handler).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/analyze-sentiment", post(analyze_sentiment_handler))
        .route("/api/generate-embedding", post(generate_embedding_handler))
        .route("/api/conversations", get(list_conversations_handler))
        .route(
            "/api/conversations/{id}/messages",
            get(conversation_messages_handler),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

fn cors_layer(settings: &CorsSettings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
