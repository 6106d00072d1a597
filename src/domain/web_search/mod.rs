//! Web search domain: the external fallback source

mod provider;

pub use provider::{WebSearchProvider, WebSearchResult, WebSearchResults};

#[cfg(test)]
pub use provider::mock::MockWebSearchProvider;
