//! LLM explanation grounded in a structured upgrade report

use std::sync::Arc;

use tracing::debug;

use crate::domain::llm::{LlmProvider, LlmRequest};
use crate::domain::release_notes::UpgradeReport;
use crate::domain::DomainError;

pub const NO_CHANGES_MESSAGE: &str = "No relevant changes found in release notes.";

const SYSTEM_PROMPT: &str = "You are a DevOps Upgrade Intelligence Assistant. \
Use ONLY the structured changes provided. Do NOT invent changes, versions or commands.";

/// Explains an [`UpgradeReport`] without adding facts beyond its changes
#[derive(Debug)]
pub struct GroundedExplainer {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl GroundedExplainer {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    pub async fn explain(
        &self,
        question: &str,
        report: &UpgradeReport,
    ) -> Result<String, DomainError> {
        if report.changes.is_empty() {
            return Ok(NO_CHANGES_MESSAGE.to_string());
        }

        let request = LlmRequest::prompt(render_prompt(question, report))
            .with_system(SYSTEM_PROMPT)
            .with_max_tokens(800);

        debug!(
            model = %self.model,
            tool = %report.tool,
            changes = report.changes.len(),
            "Explaining upgrade report"
        );

        let response = self.provider.chat(&self.model, request).await?;

        response.content().map(str::to_string).ok_or_else(|| {
            DomainError::provider(self.provider.provider_name(), "Empty response from LLM")
        })
    }
}

fn render_prompt(question: &str, report: &UpgradeReport) -> String {
    let changes = report
        .changes
        .iter()
        .map(|c| format!("[{}] ({}) {}", c.version, c.category, c.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Tool: {tool}\nUpgrade: {from} -> {to}\nQuestion Type: {focus}\nRisk Level: {risk}\n\n\
         Structured Changes:\n{changes}\n\n\
         User Question:\n{question}\n\n\
         Explain clearly, grouped by change type, and finish with the actions required before upgrading.",
        tool = report.tool,
        from = report.from,
        to = report.to,
        focus = report.focus.as_str(),
        risk = report.risk,
        changes = changes,
        question = question,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MockLlmProvider;
    use crate::domain::release_notes::{build_report, parse_release_notes, ReleaseVersion};

    fn report(question: &str) -> UpgradeReport {
        let v129 = ReleaseVersion::parse("1.29.0").unwrap();
        let records = parse_release_notes(
            "## Removed\n- flowcontrol.apiserver.k8s.io/v1beta2\n## Security\n- CVE-2024-0001 fixed\n",
            "kubernetes",
            &v129,
        );
        let from = ReleaseVersion::parse("1.28.0").unwrap();

        build_report(&records, "kubernetes", &from, &v129, question).unwrap()
    }

    #[tokio::test]
    async fn test_explain_renders_structured_changes() {
        let provider = Arc::new(MockLlmProvider::new("mock").with_reply("Remove the v1beta2 API."));
        let explainer = GroundedExplainer::new(provider.clone(), "gpt-4o-mini");

        let explanation = explainer
            .explain("what breaks?", &report("what breaks?"))
            .await
            .unwrap();

        assert_eq!(explanation, "Remove the v1beta2 API.");
        let prompt = &provider.prompts()[0];
        assert!(prompt.contains("[1.29.0] (removed) flowcontrol.apiserver.k8s.io/v1beta2"));
        assert!(prompt.contains("Question Type: breaking"));
        assert!(!prompt.contains("CVE-2024-0001"));
    }

    #[tokio::test]
    async fn test_no_changes_skips_model() {
        let provider = Arc::new(MockLlmProvider::new("mock").with_reply("unused"));
        let explainer = GroundedExplainer::new(provider.clone(), "gpt-4o-mini");

        let v130 = ReleaseVersion::parse("1.30.0").unwrap();
        let v131 = ReleaseVersion::parse("1.31.0").unwrap();
        let empty = build_report(&[], "kubernetes", &v130, &v131, "anything").unwrap();

        let explanation = explainer.explain("anything", &empty).await.unwrap();

        assert_eq!(explanation, NO_CHANGES_MESSAGE);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let provider = Arc::new(MockLlmProvider::new("mock").with_error("rate limited"));
        let explainer = GroundedExplainer::new(provider, "gpt-4o-mini");

        let err = explainer
            .explain("what breaks?", &report("what breaks?"))
            .await
            .unwrap_err();

        assert!(err.is_external());
    }
}
