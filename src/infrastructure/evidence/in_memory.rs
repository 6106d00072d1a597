//! In-memory evidence store with exact L2 nearest-neighbor search

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::embedding::{l2_distance, EmbeddingProvider, EmbeddingRequest};
use crate::domain::evidence::{EvidenceItem, EvidenceStore};
use crate::domain::DomainError;

const EMBEDDING_BATCH_SIZE: usize = 64;

#[derive(Debug, Clone)]
struct IndexedPassage {
    content: String,
    source: Option<String>,
    embedding: Vec<f32>,
}

/// Evidence store that embeds passages up front and scans them per query
#[derive(Debug)]
pub struct InMemoryEvidenceStore {
    embedder: Arc<dyn EmbeddingProvider>,
    passages: RwLock<Vec<IndexedPassage>>,
}

impl InMemoryEvidenceStore {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            embedder,
            passages: RwLock::new(Vec::new()),
        }
    }

    /// Embed and index passages; returns the number indexed
    pub async fn add_passages(
        &self,
        passages: Vec<String>,
        source: Option<&str>,
    ) -> Result<usize, DomainError> {
        let passages: Vec<String> = passages
            .into_iter()
            .filter(|p| !p.trim().is_empty())
            .collect();

        let mut indexed = Vec::with_capacity(passages.len());

        for batch in passages.chunks(EMBEDDING_BATCH_SIZE) {
            let request = EmbeddingRequest::batch(self.embedder.default_model(), batch.to_vec());
            let embeddings = self.embedder.embed(request).await?.into_embeddings();

            if embeddings.len() != batch.len() {
                return Err(DomainError::provider(
                    self.embedder.provider_name(),
                    format!(
                        "Expected {} embeddings, received {}",
                        batch.len(),
                        embeddings.len()
                    ),
                ));
            }

            indexed.extend(batch.iter().zip(embeddings).map(|(content, embedding)| {
                IndexedPassage {
                    content: content.clone(),
                    source: source.map(str::to_string),
                    embedding: embedding.into_vector(),
                }
            }));
        }

        let count = indexed.len();
        self.passages.write().await.extend(indexed);
        debug!(count, source = ?source, "Indexed evidence passages");

        Ok(count)
    }
}

#[async_trait]
impl EvidenceStore for InMemoryEvidenceStore {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<EvidenceItem>, DomainError> {
        if k == 0 || self.passages.read().await.is_empty() {
            return Ok(vec![]);
        }

        let query_embedding = self.embedder.embed_text(query).await?;
        let query_vector = query_embedding.vector();

        let passages = self.passages.read().await;
        let mut scored: Vec<(f32, &IndexedPassage)> = passages
            .iter()
            .map(|p| (l2_distance(&p.embedding, query_vector), p))
            .collect();

        scored.sort_by(|a, b| a.0.total_cmp(&b.0));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(distance, p)| {
                let item = EvidenceItem::new(p.content.clone(), distance);
                match &p.source {
                    Some(source) => item.with_source(source.clone()),
                    None => item,
                }
            })
            .collect())
    }

    async fn passage_count(&self) -> usize {
        self.passages.read().await.len()
    }

    fn store_name(&self) -> &'static str {
        "in_memory"
    }
}
