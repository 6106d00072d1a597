//! Evidence domain
//!
//! Passages retrieved from a nearest-neighbor store, and the knowledge source a
//! session answers from.

mod item;
mod source;
mod store;

pub use item::{join_evidence, EvidenceItem};
pub use source::KnowledgeSource;
pub use store::EvidenceStore;

#[cfg(test)]
pub use store::mock::MockEvidenceStore;
