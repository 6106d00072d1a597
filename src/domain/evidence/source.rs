use std::sync::Arc;

use super::EvidenceStore;
use crate::domain::retrieval::DomainProfile;

/// An indexed corpus together with the profile of its topical domain
#[derive(Debug, Clone)]
pub struct KnowledgeSource {
    name: String,
    store: Arc<dyn EvidenceStore>,
    profile: Option<DomainProfile>,
}

impl KnowledgeSource {
    pub fn new(name: impl Into<String>, store: Arc<dyn EvidenceStore>) -> Self {
        Self {
            name: name.into(),
            store,
            profile: None,
        }
    }

    pub fn with_profile(mut self, profile: DomainProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn store(&self) -> &Arc<dyn EvidenceStore> {
        &self.store
    }

    /// Domain profile, `None` when no domain could be established for the corpus
    pub fn profile(&self) -> Option<&DomainProfile> {
        self.profile.as_ref()
    }
}
