//! Pure routing rules of the fallback policy

use super::PolicyConfig;
use crate::domain::retrieval::{ConfidenceScore, DomainSimilarity};
use crate::domain::verification::Verdict;

/// Branch taken for a data query once retrieval signals are known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Synthesize from the evidence store
    Answer,
    /// In-domain numeric query: search the web without asking
    WebSearch,
    /// Off-domain (or unknown domain): ask before searching the web
    AskConfirm,
    NoRelevantData,
}

/// Pick a route from retrieval signals
///
/// A missing similarity counts as a domain mismatch so the policy never
/// escalates silently without knowing the domain.
pub fn route(
    confidence: ConfidenceScore,
    similarity: Option<DomainSimilarity>,
    numeric: bool,
    config: &PolicyConfig,
) -> Route {
    if confidence.meets(config.confidence_threshold) {
        return Route::Answer;
    }

    match similarity {
        Some(s) if s.meets(config.domain_threshold) && numeric => Route::WebSearch,
        Some(s) if s.meets(config.domain_threshold) => Route::NoRelevantData,
        _ => Route::AskConfirm,
    }
}

/// Whether a store answer with this verdict may be surfaced
///
/// Numeric answers are extracted verbatim from the evidence and survive any verdict.
pub fn accept_verdict(verdict: Verdict, numeric: bool, accept_weak: bool) -> bool {
    match verdict {
        Verdict::Strong => true,
        Verdict::Weak => accept_weak || numeric,
        Verdict::Fail => numeric,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PolicyConfig {
        PolicyConfig::default()
    }

    #[test]
    fn test_high_confidence_answers() {
        let route = route(ConfidenceScore::new(0.8), None, false, &config());
        assert_eq!(route, Route::Answer);
    }

    #[test]
    fn test_in_domain_numeric_searches_web() {
        let route = route(
            ConfidenceScore::new(0.2),
            Some(DomainSimilarity::new(0.7)),
            true,
            &config(),
        );
        assert_eq!(route, Route::WebSearch);
    }

    #[test]
    fn test_off_domain_asks_confirmation() {
        let route = route(
            ConfidenceScore::new(0.2),
            Some(DomainSimilarity::new(0.1)),
            true,
            &config(),
        );
        assert_eq!(route, Route::AskConfirm);
    }

    #[test]
    fn test_unknown_domain_asks_confirmation() {
        let route = route(ConfidenceScore::new(0.2), None, true, &config());
        assert_eq!(route, Route::AskConfirm);
    }

    #[test]
    fn test_in_domain_non_numeric_has_no_data() {
        let route = route(
            ConfidenceScore::new(0.2),
            Some(DomainSimilarity::new(0.45)),
            false,
            &config(),
        );
        assert_eq!(route, Route::NoRelevantData);
    }

    #[test]
    fn test_accept_verdict() {
        assert!(accept_verdict(Verdict::Strong, false, false));
        assert!(accept_verdict(Verdict::Weak, false, true));
        assert!(!accept_verdict(Verdict::Weak, false, false));
        assert!(!accept_verdict(Verdict::Fail, false, true));
        assert!(accept_verdict(Verdict::Fail, true, false));
    }
}
