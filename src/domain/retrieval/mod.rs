//! Retrieval signals
//!
//! The two scalars the fallback policy branches on: how well the retrieved
//! evidence covers the query, and how close the query is to the corpus domain.

mod confidence;
mod domain_profile;

pub use confidence::{ConfidenceScore, ConfidenceScorer, KeywordConfidenceScorer};
pub use domain_profile::{DomainProfile, DomainSimilarity};
