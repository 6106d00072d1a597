//! LLM-backed answer verifier
//!
//! Fail-closed: provider errors, timeouts and unexpected tokens all yield
//! [`Verdict::Fail`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::llm::{LlmProvider, LlmRequest};
use crate::domain::verification::{Verdict, VerdictVocabulary, Verifier};

const VERIFY_TEMPLATE: &str = "You are a Corrective RAG (CRAG) verifier.

User Question:
${query}

Answer:
${answer}

Evidence:
${evidence}

Is the answer supported by the evidence and does it directly answer the question?
Reply ONLY with one word: ${tokens}.";

#[derive(Debug)]
pub struct LlmVerifier {
    provider: Arc<dyn LlmProvider>,
    model: String,
    vocabulary: VerdictVocabulary,
    timeout: Duration,
}

impl LlmVerifier {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            vocabulary: VerdictVocabulary::default(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_vocabulary(mut self, vocabulary: VerdictVocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_prompt(&self, query: &str, answer: &str, evidence: &str) -> String {
        VERIFY_TEMPLATE
            .replace("${query}", query)
            .replace("${answer}", answer)
            .replace("${evidence}", evidence)
            .replace("${tokens}", &self.vocabulary.tokens().join(" or "))
    }
}

#[async_trait]
impl Verifier for LlmVerifier {
    async fn verify(&self, query: &str, answer: &str, evidence: &str) -> Verdict {
        if answer.trim().is_empty() || evidence.trim().is_empty() {
            return Verdict::Fail;
        }

        let request =
            LlmRequest::prompt(self.build_prompt(query, answer, evidence)).with_max_tokens(5);

        let response =
            match tokio::time::timeout(self.timeout, self.provider.chat(&self.model, request)).await
            {
                Ok(Ok(response)) => response,
                Ok(Err(e)) => {
                    warn!(error = %e, "Verifier call failed, treating as FAIL");
                    return Verdict::Fail;
                }
                Err(_) => {
                    warn!(
                        timeout_secs = self.timeout.as_secs(),
                        "Verifier call timed out, treating as FAIL"
                    );
                    return Verdict::Fail;
                }
            };

        let raw = response.content().unwrap_or_default();
        let verdict = self.vocabulary.parse(raw);
        debug!(raw = %raw, %verdict, "Verifier verdict");

        verdict
    }
}
