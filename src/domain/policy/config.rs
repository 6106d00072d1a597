//! Fallback policy configuration

use serde::{Deserialize, Serialize};

use crate::domain::verification::VerdictVocabulary;
use crate::domain::DomainError;

/// Tunables for the retrieval fallback policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Minimum retrieval confidence to answer from the evidence store
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,
    /// Minimum domain similarity to treat a query as in-domain
    #[serde(default = "default_domain_threshold")]
    pub domain_threshold: f32,
    /// Passages retrieved per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Re-retrieve once with a broadened query before escalating
    #[serde(default = "default_true")]
    pub broaden_retrieval: bool,
    /// Multiplier applied to `top_k` for the broadened retrieval
    #[serde(default = "default_broaden_factor")]
    pub broaden_factor: usize,
    /// Text appended to the query for the broadened retrieval
    #[serde(default = "default_broaden_suffix")]
    pub broaden_suffix: String,
    /// Surface WEAK verdicts instead of downgrading them
    #[serde(default = "default_true")]
    pub accept_weak_verdicts: bool,
    #[serde(default)]
    pub verdict_vocabulary: VerdictVocabulary,
    /// Timeout for evidence, embedding and LLM calls
    #[serde(default = "default_provider_timeout_secs")]
    pub provider_timeout_secs: u64,
    #[serde(default = "default_web_search_timeout_secs")]
    pub web_search_timeout_secs: u64,
    /// How long a pending web-search confirmation stays valid
    #[serde(default = "default_confirmation_ttl_secs")]
    pub confirmation_ttl_secs: u64,
    #[serde(default = "default_greeting_response")]
    pub greeting_response: String,
}

fn default_confidence_threshold() -> f32 {
    0.6
}

fn default_domain_threshold() -> f32 {
    0.45
}

fn default_top_k() -> usize {
    5
}

fn default_true() -> bool {
    true
}

fn default_broaden_factor() -> usize {
    2
}

fn default_broaden_suffix() -> String {
    "including all relevant rows and numeric comparisons".to_string()
}

fn default_provider_timeout_secs() -> u64 {
    30
}

fn default_web_search_timeout_secs() -> u64 {
    10
}

fn default_confirmation_ttl_secs() -> u64 {
    300
}

fn default_greeting_response() -> String {
    "👋 Hello! Ask me a question about your data.".to_string()
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            domain_threshold: default_domain_threshold(),
            top_k: default_top_k(),
            broaden_retrieval: true,
            broaden_factor: default_broaden_factor(),
            broaden_suffix: default_broaden_suffix(),
            accept_weak_verdicts: true,
            verdict_vocabulary: VerdictVocabulary::default(),
            provider_timeout_secs: default_provider_timeout_secs(),
            web_search_timeout_secs: default_web_search_timeout_secs(),
            confirmation_ttl_secs: default_confirmation_ttl_secs(),
            greeting_response: default_greeting_response(),
        }
    }
}

impl PolicyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    pub fn with_domain_threshold(mut self, threshold: f32) -> Self {
        self.domain_threshold = threshold;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_broaden_retrieval(mut self, enabled: bool) -> Self {
        self.broaden_retrieval = enabled;
        self
    }

    pub fn with_accept_weak_verdicts(mut self, accept: bool) -> Self {
        self.accept_weak_verdicts = accept;
        self
    }

    pub fn with_verdict_vocabulary(mut self, vocabulary: VerdictVocabulary) -> Self {
        self.verdict_vocabulary = vocabulary;
        self
    }

    pub fn with_provider_timeout_secs(mut self, secs: u64) -> Self {
        self.provider_timeout_secs = secs;
        self
    }

    pub fn with_confirmation_ttl_secs(mut self, secs: u64) -> Self {
        self.confirmation_ttl_secs = secs;
        self
    }

    /// Passages requested by the broadened retrieval
    pub fn broadened_k(&self) -> usize {
        self.top_k.saturating_mul(self.broaden_factor.max(1))
    }

    pub fn broadened_query(&self, query: &str) -> String {
        format!("{} {}", query.trim(), self.broaden_suffix.trim())
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        for (name, value) in [
            ("confidence_threshold", self.confidence_threshold),
            ("domain_threshold", self.domain_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(DomainError::configuration(format!(
                    "policy.{} must be between 0.0 and 1.0, got {}",
                    name, value
                )));
            }
        }

        if self.top_k == 0 {
            return Err(DomainError::configuration(
                "policy.top_k must be greater than 0",
            ));
        }

        if self.provider_timeout_secs == 0 || self.web_search_timeout_secs == 0 {
            return Err(DomainError::configuration(
                "policy timeouts must be greater than 0",
            ));
        }

        Ok(())
    }
}
