//! Verifier implementations

mod llm_verifier;

pub use llm_verifier::LlmVerifier;
