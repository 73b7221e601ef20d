use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Serialize;

use crate::domain::Embedding;
use crate::presentation::error::ApiError;
use crate::presentation::state::AppState;

use super::sentiment::TextRequest;

#[derive(Debug, Serialize)]
pub struct EmbeddingResponse {
    pub embedding: Embedding,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[tracing::instrument(skip(state, payload))]
pub async fn generate_embedding_handler(
    State(state): State<AppState>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<EmbeddingResponse>, ApiError> {
    let Json(request) = payload?;
    let text = request.require_text()?;

    let outcome = state.gateway.generate_embedding(&text).await;
    tracing::debug!(
        dimensions = outcome.embedding.dimensions(),
        degraded = outcome.note.is_some(),
        "Generated embedding"
    );

    Ok(Json(EmbeddingResponse {
        embedding: outcome.embedding,
        note: outcome.note,
    }))
}
