//! Retrieval confidence scoring

use std::fmt::{self, Debug};

use serde::{Deserialize, Serialize};

use crate::domain::evidence::EvidenceItem;
use crate::domain::query::extract_keywords;

/// Heuristic estimate in [0, 1] of whether retrieved evidence is sufficient
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfidenceScore(f32);

impl ConfidenceScore {
    pub const ZERO: Self = Self(0.0);

    /// Clamps into [0, 1]; NaN becomes 0
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    pub fn meets(&self, threshold: f32) -> bool {
        self.0 >= threshold
    }
}

impl fmt::Display for ConfidenceScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Scores retrieved evidence against the query that produced it
pub trait ConfidenceScorer: Send + Sync + Debug {
    fn score(&self, query: &str, evidence: &[EvidenceItem]) -> ConfidenceScore;

    fn scorer_name(&self) -> &'static str;
}

/// Fraction of passages containing at least one query keyword
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordConfidenceScorer;

impl KeywordConfidenceScorer {
    pub fn new() -> Self {
        Self
    }
}

impl ConfidenceScorer for KeywordConfidenceScorer {
    fn score(&self, query: &str, evidence: &[EvidenceItem]) -> ConfidenceScore {
        if evidence.is_empty() {
            return ConfidenceScore::ZERO;
        }

        let keywords = extract_keywords(query);
        if keywords.is_empty() {
            return ConfidenceScore::ZERO;
        }

        let hits = evidence
            .iter()
            .filter(|item| {
                let content = item.content().to_lowercase();
                keywords.iter().any(|k| content.contains(k.as_str()))
            })
            .count();

        ConfidenceScore::new(hits as f32 / evidence.len() as f32)
    }

    fn scorer_name(&self) -> &'static str {
        "keyword"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(contents: &[&str]) -> Vec<EvidenceItem> {
        contents
            .iter()
            .enumerate()
            .map(|(i, c)| EvidenceItem::new(*c, i as f32))
            .collect()
    }

    #[test]
    fn test_score_is_fraction_of_matching_passages() {
        let scorer = KeywordConfidenceScorer::new();
        let evidence = items(&[
            "Gold price on 2024-01-05 was 62450 INR",
            "Silver closed flat",
            "GOLD futures rose",
            "Copper demand",
        ]);

        let score = scorer.score("What was the gold price?", &evidence);
        assert!((score.value() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_empty_evidence_scores_zero() {
        let scorer = KeywordConfidenceScorer::new();
        assert_eq!(scorer.score("gold price", &[]), ConfidenceScore::ZERO);
    }

    #[test]
    fn test_query_without_keywords_scores_zero() {
        let scorer = KeywordConfidenceScorer::new();
        let evidence = items(&["2024 was a year"]);
        assert_eq!(scorer.score("what is 2024", &evidence), ConfidenceScore::ZERO);
    }

    #[test]
    fn test_confidence_clamped() {
        assert_eq!(ConfidenceScore::new(1.7).value(), 1.0);
        assert_eq!(ConfidenceScore::new(-0.3).value(), 0.0);
        assert_eq!(ConfidenceScore::new(f32::NAN).value(), 0.0);
        assert!(ConfidenceScore::new(0.6).meets(0.6));
        assert!(!ConfidenceScore::new(0.59).meets(0.6));
    }
}
