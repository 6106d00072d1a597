//! LLM-backed answer synthesizer
//!
//! Every prompt restricts the model to the supplied context. Templates use
//! `${query}`, `${context}` and `${source}` placeholders.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::llm::{LlmProvider, LlmRequest};
use crate::domain::query::normalize_numeric_answer;
use crate::domain::synthesis::{AnswerSource, AnswerSynthesizer};
use crate::domain::DomainError;

const ANSWER_TEMPLATE: &str = "You are answering using ONLY the ${source} below.
Perform comparisons and numeric reasoning if required.
If the answer is not in the context, say that it is not available.

Context:
${context}

Question:
${query}

Answer clearly and concisely.";

const NUMERIC_TEMPLATE: &str = "Extract the value that answers the question from the context below.
Return only the numeric value with unit if available.
If no value is present, reply NONE.

Context:
${context}

Question:
${query}";

const DOMAIN_TEMPLATE: &str = "Here is a sample of a dataset:

${context}

Describe in ONE short line what this data is mainly about.";

/// Answer synthesizer that prompts a chat-completion model at temperature 0
#[derive(Debug)]
pub struct LlmAnswerSynthesizer {
    provider: Arc<dyn LlmProvider>,
    model: String,
    answer_template: String,
    numeric_template: String,
    domain_template: String,
}

impl LlmAnswerSynthesizer {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            answer_template: ANSWER_TEMPLATE.to_string(),
            numeric_template: NUMERIC_TEMPLATE.to_string(),
            domain_template: DOMAIN_TEMPLATE.to_string(),
        }
    }

    pub fn with_answer_template(mut self, template: impl Into<String>) -> Self {
        self.answer_template = template.into();
        self
    }

    pub fn with_numeric_template(mut self, template: impl Into<String>) -> Self {
        self.numeric_template = template.into();
        self
    }

    fn render(template: &str, query: &str, context: &str, source: &str) -> String {
        template
            .replace("${query}", query)
            .replace("${context}", context)
            .replace("${source}", source)
    }

    async fn complete(&self, prompt: String, max_tokens: u32) -> Result<String, DomainError> {
        let request = LlmRequest::prompt(prompt).with_max_tokens(max_tokens);

        let response = self.provider.chat(&self.model, request).await?;

        response
            .content()
            .map(str::to_string)
            .ok_or_else(|| DomainError::provider(self.provider.provider_name(), "Empty response from LLM"))
    }
}

#[async_trait]
impl AnswerSynthesizer for LlmAnswerSynthesizer {
    async fn answer(
        &self,
        query: &str,
        context: &str,
        source: AnswerSource,
    ) -> Result<String, DomainError> {
        let prompt = Self::render(&self.answer_template, query, context, &source.to_string());
        debug!(model = %self.model, %source, "Synthesizing answer");

        self.complete(prompt, 512).await
    }

    async fn extract_numeric(
        &self,
        query: &str,
        context: &str,
    ) -> Result<Option<String>, DomainError> {
        let prompt = Self::render(&self.numeric_template, query, context, "");
        let raw = self.complete(prompt, 32).await?;

        let value = normalize_numeric_answer(&raw);
        debug!(raw = %raw, value = ?value, "Extracted numeric value");

        Ok(value)
    }

    async fn summarize_domain(&self, sample: &str) -> Result<String, DomainError> {
        let prompt = Self::render(&self.domain_template, "", sample, "");
        let summary = self.complete(prompt, 60).await?;

        Ok(summary.lines().next().unwrap_or_default().trim().to_string())
    }
}
