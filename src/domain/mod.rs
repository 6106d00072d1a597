//! Domain layer - Core types, traits and policy rules

pub mod embedding;
pub mod error;
pub mod evidence;
pub mod llm;
pub mod policy;
pub mod query;
pub mod release_notes;
pub mod retrieval;
pub mod synthesis;
pub mod verification;
pub mod web_search;

pub use embedding::{Embedding, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse};
pub use error::DomainError;
pub use evidence::{EvidenceItem, EvidenceStore, KnowledgeSource};
pub use llm::{LlmProvider, LlmRequest, LlmResponse, Message, MessageRole};
pub use policy::{
    DeclineReason, Decision, PolicyConfig, PolicyOutcome, PolicyRequest, PolicySignals,
    Provenance, SessionState,
};
pub use retrieval::{ConfidenceScore, ConfidenceScorer, DomainProfile, DomainSimilarity};
pub use synthesis::{AnswerSource, AnswerSynthesizer};
pub use verification::{Verdict, VerdictVocabulary, Verifier};
pub use web_search::{WebSearchProvider, WebSearchResult, WebSearchResults};
