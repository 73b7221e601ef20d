use async_trait::async_trait;

use crate::application::ports::{Embedder, EmbedderError};
use crate::domain::{EMBEDDING_DIMENSIONS, Embedding};

/// Pseudo-embedding seeded by the sum of the text's UTF-16 code units.
/// Identical input always gives an identical vector; the values carry no
/// semantic meaning.
pub fn pseudo_embedding(text: &str) -> Embedding {
    let seed: u64 = text.encode_utf16().map(u64::from).sum();
    let width = EMBEDDING_DIMENSIONS as f64;

    let values = (0..EMBEDDING_DIMENSIONS)
        .map(|i| ((seed as f64 * (i as f64 + 1.0) / width).sin() / 2.0 + 0.5) as f32)
        .collect();

    Embedding::new(values)
}

pub struct SimulatedEmbedder;

#[async_trait]
impl Embedder for SimulatedEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedderError> {
        tracing::debug!("Using simulated embedding response");
        Ok(pseudo_embedding(text))
    }
}
