use axum::Json;
use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use serde::Serialize;

use crate::application::services::IMAGE_ANALYSIS_FALLBACK;
use crate::infrastructure::observability::sanitize_prompt;
use crate::infrastructure::storage::StagingError;
use crate::presentation::error::ApiError;
use crate::presentation::state::AppState;

pub const DEFAULT_IMAGE_PROMPT: &str = "Analyze this image in detail.";

#[derive(Debug, Serialize)]
pub struct ImageAnalysisResponse {
    pub analysis: String,
}

/// Accepts a multipart form with an `image` file and an optional `prompt`.
/// The upload is staged on disk for the duration of the call and removed on
/// every exit path; provider failures come back as a fixed apology.
#[tracing::instrument(skip(state, multipart))]
pub async fn analyze_image_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ImageAnalysisResponse>, ApiError> {
    let mut multipart = multipart?;
    let mut image: Option<Bytes> = None;
    let mut prompt: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("image") => image = Some(field.bytes().await?),
            Some("prompt") => prompt = Some(field.text().await?),
            _ => {}
        }
    }

    let image = match image {
        Some(bytes) if !bytes.is_empty() => bytes,
        _ => {
            tracing::warn!("Image analysis request with no file");
            return Err(ApiError::Validation("No image file uploaded".to_string()));
        }
    };

    let prompt = prompt
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_IMAGE_PROMPT.to_string());

    tracing::debug!(size = image.len(), prompt = %sanitize_prompt(&prompt), "Staging image upload");

    let staged = match state.upload_staging.stage(&image).await {
        Ok(staged) => staged,
        Err(StagingError::TooLarge { size, limit }) => {
            tracing::warn!(size, limit, "Image upload over size limit");
            return Err(ApiError::PayloadTooLarge("File too large".to_string()));
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to stage image upload");
            return Ok(Json(ImageAnalysisResponse {
                analysis: IMAGE_ANALYSIS_FALLBACK.to_string(),
            }));
        }
    };

    let analysis = match staged.read().await {
        Ok(bytes) => match state.gateway.analyze_image(&bytes, &prompt).await {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!(error = %e, "Image analysis failed");
                IMAGE_ANALYSIS_FALLBACK.to_string()
            }
        },
        Err(e) => {
            tracing::error!(error = %e, "Failed to read staged upload");
            IMAGE_ANALYSIS_FALLBACK.to_string()
        }
    };

    if let Err(e) = staged.discard() {
        tracing::warn!(error = %e, "Failed to remove staged upload");
    }

    Ok(Json(ImageAnalysisResponse { analysis }))
}
