use serde::{Deserialize, Serialize};

/// A passage returned by the evidence store
///
/// `score` is a distance: lower means more similar to the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    content: String,
    score: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl EvidenceItem {
    pub fn new(content: impl Into<String>, score: f32) -> Self {
        Self {
            content: content.into(),
            score,
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

/// Concatenate passages into a single context block, one passage per line
pub fn join_evidence(items: &[EvidenceItem]) -> String {
    items
        .iter()
        .map(|item| item.content())
        .collect::<Vec<_>>()
        .join("\n")
}
