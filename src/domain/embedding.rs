use serde::{Deserialize, Serialize};

/// Width of every embedding the service hands out.
pub const EMBEDDING_DIMENSIONS: usize = 1536;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Embedding {
    pub values: Vec<f32>,
}

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    pub fn zeros() -> Self {
        Self::new(vec![0.0; EMBEDDING_DIMENSIONS])
    }

    pub fn dimensions(&self) -> usize {
        self.values.len()
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }
}
