//! Embedding provider trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use super::{Embedding, EmbeddingRequest, EmbeddingResponse};
use crate::domain::DomainError;

/// Trait for embedding providers (OpenAI-compatible endpoints, local models, ...)
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Generate embeddings for the given input
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;

    /// Model used by `embed_text`
    fn default_model(&self) -> &str;

    /// Embed a single text with the default model
    async fn embed_text(&self, text: &str) -> Result<Embedding, DomainError> {
        let request = EmbeddingRequest::single(self.default_model(), text);
        let response = self.embed(request).await?;

        response.into_embeddings().into_iter().next().ok_or_else(|| {
            DomainError::provider(self.provider_name(), "Embedding response was empty")
        })
    }
}
