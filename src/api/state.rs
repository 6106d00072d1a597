//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::policy::FallbackAgent;
use crate::infrastructure::session::SessionRegistry;

/// Shared by every handler; the agent is immutable, sessions are keyed state
#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<FallbackAgent>,
    pub sessions: SessionRegistry,
}

impl AppState {
    pub fn new(agent: Arc<FallbackAgent>, sessions: SessionRegistry) -> Self {
        Self { agent, sessions }
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::embedding::MockEmbeddingProvider;
    use crate::domain::evidence::{EvidenceItem, KnowledgeSource, MockEvidenceStore};
    use crate::domain::policy::PolicyConfig;
    use crate::domain::retrieval::DomainProfile;
    use crate::domain::synthesis::MockAnswerSynthesizer;
    use crate::domain::verification::{MockVerifier, Verdict};
    use crate::domain::web_search::{MockWebSearchProvider, WebSearchResult};

    /// State over a small bullion-price corpus; "weather in paris" is off-domain
    pub fn mock_state() -> (AppState, Arc<MockWebSearchProvider>) {
        mock_state_with_web(
            MockWebSearchProvider::new().with_result(WebSearchResult::new("Paris is sunny")),
        )
    }

    pub fn mock_state_with_web(
        web: MockWebSearchProvider,
    ) -> (AppState, Arc<MockWebSearchProvider>) {
        let store = Arc::new(MockEvidenceStore::new().with_items(vec![
            EvidenceItem::new("2024-01-05 | gold | 62450", 0.1),
            EvidenceItem::new("2024-01-06 | gold | 62600", 0.2),
        ]));
        let web = Arc::new(web);
        let embedder = Arc::new(
            MockEmbeddingProvider::new("mock", 2).with_vector("weather in paris", vec![0.0, 1.0]),
        );

        let agent = FallbackAgent::new(
            PolicyConfig::default(),
            embedder,
            Arc::new(MockAnswerSynthesizer::new("Gold closed at 62450.")),
            Arc::new(MockVerifier::new(Verdict::Strong)),
            web.clone(),
        )
        .with_source(
            KnowledgeSource::new("prices.csv", store)
                .with_profile(DomainProfile::new("Daily bullion prices", vec![1.0, 0.0])),
        );

        (AppState::new(Arc::new(agent), SessionRegistry::new()), web)
    }
}
