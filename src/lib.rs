//! Adaptive RAG Agent
//!
//! Answers questions from a loaded dataset and falls back to web search only
//! when the dataset cannot support an answer:
//! - Keyword confidence over retrieved passages, with one broadened retry
//! - Embedding-based domain classification against a profiled corpus
//! - Verified answers, fail-closed on unsupported claims
//! - Per-session web-search confirmation
//! - Release-notes upgrade analysis

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};

use domain::{AnswerSynthesizer, DomainError, EmbeddingProvider, KnowledgeSource, LlmProvider};
use infrastructure::{
    embedding::OpenAiEmbeddingProvider,
    evidence::{load_passages, FixedSizeChunker, InMemoryEvidenceStore},
    llm::{HttpClient, OpenAiProvider},
    policy::FallbackAgent,
    retrieval::DomainProfiler,
    synthesis::LlmAnswerSynthesizer,
    verification::LlmVerifier,
    web_search::SerpApiProvider,
};

/// External collaborators built from configuration
pub struct Providers {
    pub llm: Arc<dyn LlmProvider>,
    pub embedder: Arc<dyn EmbeddingProvider>,
    pub synthesizer: Arc<dyn AnswerSynthesizer>,
}

/// Build the LLM and embedding providers
pub fn create_providers(config: &AppConfig) -> anyhow::Result<Providers> {
    let api_key = std::env::var(&config.llm.api_key_env)
        .with_context(|| format!("{} environment variable is required", config.llm.api_key_env))?;

    let client = HttpClient::with_timeout(Duration::from_secs(config.policy.provider_timeout_secs))?;

    let llm: Arc<dyn LlmProvider> = Arc::new(OpenAiProvider::with_base_url(
        client.clone(),
        api_key.clone(),
        &config.llm.base_url,
    ));

    let embedder: Arc<dyn EmbeddingProvider> = Arc::new(
        OpenAiEmbeddingProvider::with_base_url(client, api_key, &config.embedding.base_url)
            .with_model(&config.embedding.model),
    );

    let synthesizer: Arc<dyn AnswerSynthesizer> =
        Arc::new(LlmAnswerSynthesizer::new(llm.clone(), &config.llm.model));

    Ok(Providers {
        llm,
        embedder,
        synthesizer,
    })
}

/// Build the fallback agent, loading the configured evidence source if any
pub async fn create_agent(
    config: &AppConfig,
    source_override: Option<&Path>,
) -> anyhow::Result<FallbackAgent> {
    config.policy.validate()?;

    let providers = create_providers(config)?;

    let verifier = LlmVerifier::new(providers.llm.clone(), &config.llm.model)
        .with_vocabulary(config.policy.verdict_vocabulary)
        .with_timeout(Duration::from_secs(config.policy.provider_timeout_secs));

    // A missing key leaves web search failing per call, which the agent reports as a decline
    let web_key = std::env::var(&config.web_search.api_key_env).unwrap_or_else(|_| {
        warn!(
            env = %config.web_search.api_key_env,
            "Web search API key not set, web fallback will fail"
        );
        String::new()
    });
    let web_client =
        HttpClient::with_timeout(Duration::from_secs(config.policy.web_search_timeout_secs))?;
    let web_search = SerpApiProvider::with_base_url(web_client, web_key, &config.web_search.base_url)
        .with_num_results(config.web_search.num_results);

    let mut agent = FallbackAgent::new(
        config.policy.clone(),
        providers.embedder.clone(),
        providers.synthesizer.clone(),
        Arc::new(verifier),
        Arc::new(web_search),
    );

    let source_path = source_override
        .map(Path::to_path_buf)
        .or_else(|| config.knowledge.source_path.as_ref().map(Into::into));

    match source_path {
        Some(path) => {
            let source = load_knowledge_source(
                &path,
                &config.knowledge,
                providers.embedder,
                providers.synthesizer,
            )
            .await
            .with_context(|| format!("Failed to load evidence source {}", path.display()))?;
            agent = agent.with_source(source);
        }
        None => warn!("No evidence source configured, queries will be declined"),
    }

    Ok(agent)
}

/// Chunk, embed and profile a dataset file
pub async fn load_knowledge_source(
    path: &Path,
    knowledge: &config::KnowledgeConfig,
    embedder: Arc<dyn EmbeddingProvider>,
    synthesizer: Arc<dyn AnswerSynthesizer>,
) -> Result<KnowledgeSource, DomainError> {
    let chunker = FixedSizeChunker::new(knowledge.chunk_size, knowledge.chunk_overlap)?;
    let passages = load_passages(path, &chunker).await?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let store = InMemoryEvidenceStore::new(embedder.clone());
    let indexed = store.add_passages(passages.clone(), Some(&name)).await?;

    info!(source = %name, passages = indexed, "Evidence source indexed");

    let mut source = KnowledgeSource::new(name, Arc::new(store));

    let profiler =
        DomainProfiler::new(synthesizer, embedder).with_sample_size(knowledge.domain_sample_size);

    match profiler.profile(&passages).await {
        Ok(Some(profile)) => {
            info!(domain = %profile.summary(), "Corpus domain profiled");
            source = source.with_profile(profile);
        }
        Ok(None) => warn!("Corpus domain could not be summarized"),
        Err(e) => warn!(error = %e, "Domain profiling failed, off-domain queries will ask for confirmation"),
    }

    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KnowledgeConfig;
    use crate::domain::embedding::MockEmbeddingProvider;
    use crate::domain::synthesis::MockAnswerSynthesizer;

    async fn write_csv(name: &str, content: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("adaptive-rag-{}-{}", name, std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("prices.csv");
        tokio::fs::write(&path, content).await.unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_knowledge_source_indexes_and_profiles() {
        let path = write_csv("profiled", "date,metal,price\n2024-01-05,gold,62450\n2024-01-06,gold,62600\n").await;
        let embedder = Arc::new(MockEmbeddingProvider::new("mock", 4));
        let synthesizer =
            Arc::new(MockAnswerSynthesizer::new("unused").with_summary("Daily gold prices"));

        let source = load_knowledge_source(&path, &KnowledgeConfig::default(), embedder, synthesizer)
            .await
            .unwrap();

        assert_eq!(source.name(), "prices.csv");
        assert_eq!(source.store().passage_count().await, 3);
        assert_eq!(source.profile().unwrap().summary(), "Daily gold prices");
    }

    #[tokio::test]
    async fn test_profiling_failure_keeps_source() {
        let path = write_csv("unprofiled", "date,metal,price\n2024-01-05,gold,62450\n").await;
        let embedder = Arc::new(MockEmbeddingProvider::new("mock", 4));
        let synthesizer = Arc::new(MockAnswerSynthesizer::new("unused").with_error("overloaded"));

        let source = load_knowledge_source(&path, &KnowledgeConfig::default(), embedder, synthesizer)
            .await
            .unwrap();

        assert!(source.profile().is_none());
        assert_eq!(source.store().passage_count().await, 2);
    }

    #[tokio::test]
    async fn test_unsupported_source_format() {
        let embedder = Arc::new(MockEmbeddingProvider::new("mock", 4));
        let synthesizer = Arc::new(MockAnswerSynthesizer::new("unused"));

        let err = load_knowledge_source(
            Path::new("data.parquet"),
            &KnowledgeConfig::default(),
            embedder,
            synthesizer,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, DomainError::Validation { .. }));
    }
}
