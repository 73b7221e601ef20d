use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;

use crate::application::services::SENTIMENT_FALLBACK_EXPLANATION;
use crate::domain::SentimentAnalysis;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::error::ApiError;
use crate::presentation::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    #[serde(default)]
    pub text: String,
}

impl TextRequest {
    pub(super) fn require_text(self) -> Result<String, ApiError> {
        if self.text.trim().is_empty() {
            return Err(ApiError::Validation("Text is required".to_string()));
        }
        Ok(self.text)
    }
}

#[tracing::instrument(skip(state, payload))]
pub async fn analyze_sentiment_handler(
    State(state): State<AppState>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<SentimentAnalysis>, ApiError> {
    let Json(request) = payload?;
    let text = request.require_text()?;

    tracing::debug!(text = %sanitize_prompt(&text), "Analyzing sentiment");

    let analysis = match state.gateway.analyze_sentiment(&text).await {
        Ok(analysis) => analysis,
        Err(e) => {
            tracing::warn!(error = %e, "Sentiment analysis failed");
            SentimentAnalysis::neutral(SENTIMENT_FALLBACK_EXPLANATION)
        }
    };

    Ok(Json(analysis))
}
