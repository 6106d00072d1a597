use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::embedding::EmbeddingProvider;
use crate::domain::retrieval::DomainProfile;
use crate::domain::synthesis::AnswerSynthesizer;
use crate::domain::DomainError;

const DEFAULT_SAMPLE_SIZE: usize = 20;

/// Builds a [`DomainProfile`] from the first passages of a corpus
#[derive(Debug, Clone)]
pub struct DomainProfiler {
    synthesizer: Arc<dyn AnswerSynthesizer>,
    embedder: Arc<dyn EmbeddingProvider>,
    sample_size: usize,
}

impl DomainProfiler {
    pub fn new(
        synthesizer: Arc<dyn AnswerSynthesizer>,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        Self {
            synthesizer,
            embedder,
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }

    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size.max(1);
        self
    }

    /// `None` when the sample is empty or the model produced no summary
    pub async fn profile(&self, passages: &[String]) -> Result<Option<DomainProfile>, DomainError> {
        let sample = passages
            .iter()
            .take(self.sample_size)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n");

        if sample.trim().is_empty() {
            return Ok(None);
        }

        let summary = self.synthesizer.summarize_domain(&sample).await?;
        if summary.trim().is_empty() {
            warn!("Domain summary was empty, corpus has no domain profile");
            return Ok(None);
        }

        let embedding = self.embedder.embed_text(&summary).await?;
        info!(domain = %summary, "Profiled corpus domain");

        Ok(Some(DomainProfile::new(summary, embedding.into_vector())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::MockEmbeddingProvider;
    use crate::domain::synthesis::MockAnswerSynthesizer;

    #[tokio::test]
    async fn test_profile_uses_sample() {
        let synthesizer = Arc::new(MockAnswerSynthesizer::new("").with_summary("Bullion prices"));
        let embedder = Arc::new(
            MockEmbeddingProvider::new("mock", 2).with_vector("Bullion prices", vec![0.6, 0.8]),
        );
        let profiler = DomainProfiler::new(synthesizer.clone(), embedder).with_sample_size(2);

        let passages = vec!["row 1".to_string(), "row 2".to_string(), "row 3".to_string()];
        let profile = profiler.profile(&passages).await.unwrap().unwrap();

        assert_eq!(profile.summary(), "Bullion prices");
        assert_eq!(profile.embedding(), &[0.6, 0.8]);
        assert_eq!(synthesizer.calls()[0].1, "row 1\nrow 2");
    }

    #[tokio::test]
    async fn test_empty_corpus_has_no_profile() {
        let synthesizer = Arc::new(MockAnswerSynthesizer::new(""));
        let embedder = Arc::new(MockEmbeddingProvider::new("mock", 2));
        let profiler = DomainProfiler::new(synthesizer.clone(), embedder);

        assert!(profiler.profile(&[]).await.unwrap().is_none());
        assert!(synthesizer.calls().is_empty());
    }
}
