//! Web search provider trait and result types

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// One organic search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebSearchResult {
    pub snippet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl WebSearchResult {
    pub fn new(snippet: impl Into<String>) -> Self {
        Self {
            snippet: snippet.into(),
            link: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

/// Results of a single web search call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebSearchResults {
    results: Vec<WebSearchResult>,
}

impl WebSearchResults {
    /// Keep only hits that carry a non-blank snippet
    pub fn new(results: Vec<WebSearchResult>) -> Self {
        Self {
            results: results
                .into_iter()
                .filter(|r| !r.snippet.trim().is_empty())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.results.len()
    }

    /// All snippets joined into one context block
    pub fn context(&self) -> String {
        self.results
            .iter()
            .map(|r| r.snippet.trim())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Link of the first hit that has one, used as the cited source
    pub fn primary_link(&self) -> Option<&str> {
        self.results.iter().find_map(|r| r.link.as_deref())
    }
}

/// Trait for external web search providers
#[async_trait]
pub trait WebSearchProvider: Send + Sync + Debug {
    async fn search(&self, query: &str) -> Result<WebSearchResults, DomainError>;

    fn provider_name(&self) -> &'static str;
}
