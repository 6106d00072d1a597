use std::fmt::{self, Debug};

use async_trait::async_trait;

use crate::domain::DomainError;

/// Where the context handed to the synthesizer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    EvidenceStore,
    Web,
}

impl fmt::Display for AnswerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EvidenceStore => f.write_str("dataset"),
            Self::Web => f.write_str("web search results"),
        }
    }
}

/// Produces answers constrained to supplied context
#[async_trait]
pub trait AnswerSynthesizer: Send + Sync + Debug {
    /// Free-text answer using only `context`
    async fn answer(
        &self,
        query: &str,
        context: &str,
        source: AnswerSource,
    ) -> Result<String, DomainError>;

    /// A single normalized numeric value, `None` when the context holds no number
    async fn extract_numeric(&self, query: &str, context: &str)
        -> Result<Option<String>, DomainError>;

    /// One short line describing what a corpus sample is about
    async fn summarize_domain(&self, sample: &str) -> Result<String, DomainError>;
}
