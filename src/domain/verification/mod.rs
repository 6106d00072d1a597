//! Answer verification domain

mod verdict;
mod verifier;

pub use verdict::{Verdict, VerdictVocabulary};
pub use verifier::Verifier;

#[cfg(test)]
pub use verifier::mock::MockVerifier;
