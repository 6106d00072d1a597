//! Evidence store trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::EvidenceItem;
use crate::domain::DomainError;

/// Nearest-neighbor lookup over indexed passages
#[async_trait]
pub trait EvidenceStore: Send + Sync + Debug {
    /// Return up to `k` passages ordered by ascending distance to the query
    async fn search(&self, query: &str, k: usize) -> Result<Vec<EvidenceItem>, DomainError>;

    /// Number of passages currently indexed
    async fn passage_count(&self) -> usize;

    /// Get the store name
    fn store_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// Returns canned passages, optionally keyed by exact query text
    #[derive(Debug, Default)]
    pub struct MockEvidenceStore {
        default_items: Vec<EvidenceItem>,
        by_query: HashMap<String, Vec<EvidenceItem>>,
        passage_count: Option<usize>,
        error: Option<String>,
        searches: Mutex<Vec<(String, usize)>>,
    }

    impl MockEvidenceStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_items(mut self, items: Vec<EvidenceItem>) -> Self {
            self.default_items = items;
            self
        }

        pub fn with_items_for(mut self, query: impl Into<String>, items: Vec<EvidenceItem>) -> Self {
            self.by_query.insert(query.into(), items);
            self
        }

        pub fn with_passage_count(mut self, count: usize) -> Self {
            self.passage_count = Some(count);
            self
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        pub fn searches(&self) -> Vec<(String, usize)> {
            self.searches.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EvidenceStore for MockEvidenceStore {
        async fn search(&self, query: &str, k: usize) -> Result<Vec<EvidenceItem>, DomainError> {
            self.searches.lock().unwrap().push((query.to_string(), k));

            if let Some(ref error) = self.error {
                return Err(DomainError::provider("mock_store", error));
            }

            let items = self.by_query.get(query).unwrap_or(&self.default_items);

            Ok(items.iter().take(k).cloned().collect())
        }

        async fn passage_count(&self) -> usize {
            self.passage_count.unwrap_or(self.default_items.len().max(1))
        }

        fn store_name(&self) -> &'static str {
            "mock"
        }
    }
}
