use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::embedding::cosine_similarity;

/// Cosine similarity between a query and a corpus domain, clamped to [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainSimilarity(f32);

impl DomainSimilarity {
    /// Negative cosine and NaN clamp to 0
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    pub fn meets(&self, threshold: f32) -> bool {
        self.0 >= threshold
    }
}

impl fmt::Display for DomainSimilarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// One-line description of what a corpus is about, with its embedding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainProfile {
    summary: String,
    embedding: Vec<f32>,
}

impl DomainProfile {
    pub fn new(summary: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            summary: summary.into(),
            embedding,
        }
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn embedding(&self) -> &[f32] {
        &self.embedding
    }

    pub fn similarity_to(&self, query_embedding: &[f32]) -> DomainSimilarity {
        DomainSimilarity::new(cosine_similarity(&self.embedding, query_embedding))
    }
}
