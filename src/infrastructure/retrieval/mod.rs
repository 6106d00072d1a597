//! Domain classification backed by embeddings

mod domain_classifier;
mod profiler;

pub use domain_classifier::DomainClassifier;
pub use profiler::DomainProfiler;
