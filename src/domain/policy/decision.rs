//! Policy decisions and the outcome surfaced to callers

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::evidence::EvidenceItem;
use crate::domain::retrieval::{ConfidenceScore, DomainSimilarity};
use crate::domain::verification::Verdict;

/// What the policy chose to do with a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Canned chit-chat reply, no retrieval
    Greeting,
    AnswerFromStore,
    /// Answered from the store after one broadened re-retrieval
    RetryBroader,
    WebFallback,
    AskConfirm,
    Decline,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::AnswerFromStore => "answer_from_store",
            Self::RetryBroader => "retry_broader",
            Self::WebFallback => "web_fallback",
            Self::AskConfirm => "ask_confirm",
            Self::Decline => "decline",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a query was declined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclineReason {
    NoEvidenceSource,
    /// An answer was produced but the verifier did not support it
    Unverifiable,
    NoRelevantData,
    NoWebResults,
    NoNumericValue,
    ProviderFailure,
    InvalidInput,
    ConfirmationDeclined,
    /// A yes/no arrived after the web search offer lapsed
    ConfirmationExpired,
    /// A yes/no arrived with no web search offer outstanding
    NoPendingConfirmation,
}

impl DeclineReason {
    /// Message surfaced when no more specific text is available
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::NoEvidenceSource => "No dataset is loaded. Please load a dataset first.",
            Self::Unverifiable => "Data exists but cannot be confidently verified.",
            Self::NoRelevantData => "No relevant data found in the dataset.",
            Self::NoWebResults => "Unable to verify reliable data.",
            Self::NoNumericValue => "No numeric value could be found for this query.",
            Self::ProviderFailure => "An external service failed while answering.",
            Self::InvalidInput => "The request could not be understood.",
            Self::ConfirmationDeclined => {
                "Okay, I won't search the web. Ask another question about your data."
            }
            Self::ConfirmationExpired => {
                "The web search offer expired, please ask your question again."
            }
            Self::NoPendingConfirmation => {
                "There is no web search waiting for confirmation. Please ask a question."
            }
        }
    }
}

/// Where a surfaced answer came from
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Provenance {
    EvidenceStore,
    Web {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        link: Option<String>,
    },
    #[default]
    None,
}

/// Signals that justified a decision
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolicySignals {
    pub confidence: Option<ConfidenceScore>,
    pub domain_similarity: Option<DomainSimilarity>,
    pub numeric: bool,
    /// A broadened re-retrieval produced the confidence above
    pub broadened: bool,
}

/// Result of handling one query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyOutcome {
    pub decision: Decision,
    pub message: String,
    pub provenance: Provenance,
    pub signals: PolicySignals,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decline_reason: Option<DeclineReason>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidence: Vec<EvidenceItem>,
}

impl PolicyOutcome {
    pub fn new(decision: Decision, message: impl Into<String>, signals: PolicySignals) -> Self {
        Self {
            decision,
            message: message.into(),
            provenance: Provenance::None,
            signals,
            verdict: None,
            decline_reason: None,
            evidence: Vec::new(),
        }
    }

    pub fn greeting(message: impl Into<String>) -> Self {
        Self::new(Decision::Greeting, message, PolicySignals::default())
    }

    pub fn decline(reason: DeclineReason, signals: PolicySignals) -> Self {
        Self::decline_with_message(reason, reason.default_message(), signals)
    }

    pub fn decline_with_message(
        reason: DeclineReason,
        message: impl Into<String>,
        signals: PolicySignals,
    ) -> Self {
        let mut outcome = Self::new(Decision::Decline, message, signals);
        outcome.decline_reason = Some(reason);
        outcome
    }

    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }

    pub fn with_verdict(mut self, verdict: Verdict) -> Self {
        self.verdict = Some(verdict);
        self
    }

    pub fn with_evidence(mut self, evidence: Vec<EvidenceItem>) -> Self {
        self.evidence = evidence;
        self
    }

    pub fn is_decline(&self) -> bool {
        self.decision == Decision::Decline
    }
}
