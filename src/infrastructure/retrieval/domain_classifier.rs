use std::sync::Arc;

use tracing::debug;

use crate::domain::embedding::EmbeddingProvider;
use crate::domain::retrieval::{DomainProfile, DomainSimilarity};
use crate::domain::DomainError;

/// Estimates whether a query belongs to a corpus domain
#[derive(Debug, Clone)]
pub struct DomainClassifier {
    embedder: Arc<dyn EmbeddingProvider>,
}

impl DomainClassifier {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { embedder }
    }

    /// Similarity of `query` to the profiled domain; `None` without a profile
    pub async fn similarity(
        &self,
        query: &str,
        profile: Option<&DomainProfile>,
    ) -> Result<Option<DomainSimilarity>, DomainError> {
        let Some(profile) = profile else {
            return Ok(None);
        };

        let embedding = self.embedder.embed_text(query).await?;
        let similarity = profile.similarity_to(embedding.vector());

        debug!(%similarity, domain = %profile.summary(), "Domain similarity");

        Ok(Some(similarity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::MockEmbeddingProvider;

    #[tokio::test]
    async fn test_similarity_with_profile() {
        let embedder = Arc::new(
            MockEmbeddingProvider::new("mock", 2).with_vector("gold price", vec![1.0, 1.0]),
        );
        let classifier = DomainClassifier::new(embedder);
        let profile = DomainProfile::new("Bullion prices", vec![1.0, 0.0]);

        let similarity = classifier
            .similarity("gold price", Some(&profile))
            .await
            .unwrap()
            .unwrap();

        assert!((similarity.value() - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_no_profile_is_null_without_embedding() {
        let embedder = Arc::new(MockEmbeddingProvider::new("mock", 2));
        let classifier = DomainClassifier::new(embedder.clone());

        assert_eq!(classifier.similarity("gold", None).await.unwrap(), None);
        assert_eq!(embedder.call_count(), 0);
    }

    #[tokio::test]
    async fn test_embedding_error_propagates() {
        let embedder = Arc::new(MockEmbeddingProvider::new("mock", 2).with_error("down"));
        let classifier = DomainClassifier::new(embedder);
        let profile = DomainProfile::new("Bullion prices", vec![1.0, 0.0]);

        assert!(classifier.similarity("gold", Some(&profile)).await.is_err());
    }
}
