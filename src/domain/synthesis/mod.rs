//! Answer synthesis domain

mod synthesizer;

pub use synthesizer::{AnswerSource, AnswerSynthesizer};

#[cfg(test)]
pub use synthesizer::mock::MockAnswerSynthesizer;
