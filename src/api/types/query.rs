//! Session query payloads

use serde::{Deserialize, Serialize};

use crate::domain::policy::{
    DeclineReason, Decision, PolicyOutcome, PolicyRequest, PolicySignals, Provenance,
};
use crate::domain::Verdict;

#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    #[serde(default)]
    pub reference_date: Option<String>,
    #[serde(default)]
    pub confirm_web_search: Option<bool>,
}

impl From<QueryRequest> for PolicyRequest {
    fn from(request: QueryRequest) -> Self {
        Self {
            query: request.query,
            reference_date: request.reference_date,
            confirm_web_search: request.confirm_web_search,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub session_id: String,
    pub decision: Decision,
    pub message: String,
    pub provenance: Provenance,
    pub signals: PolicySignals,
    pub verdict: Option<Verdict>,
    pub decline_reason: Option<DeclineReason>,
    /// Whether the next turn is expected to confirm or deny a web search
    pub awaiting_confirmation: bool,
}

impl QueryResponse {
    pub fn new(
        session_id: impl Into<String>,
        outcome: PolicyOutcome,
        awaiting_confirmation: bool,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            decision: outcome.decision,
            message: outcome.message,
            provenance: outcome.provenance,
            signals: outcome.signals,
            verdict: outcome.verdict,
            decline_reason: outcome.decline_reason,
            awaiting_confirmation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request: QueryRequest = serde_json::from_str(r#"{"query":"gold price"}"#).unwrap();
        let request = PolicyRequest::from(request);

        assert_eq!(request.query, "gold price");
        assert!(request.reference_date.is_none());
        assert!(request.confirm_web_search.is_none());
    }

    #[test]
    fn test_response_serialization() {
        let outcome = PolicyOutcome::decline(DeclineReason::NoRelevantData, PolicySignals::default());
        let response = QueryResponse::new("s1", outcome, false);

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["session_id"], "s1");
        assert_eq!(json["decision"], "decline");
        assert_eq!(json["decline_reason"], "no_relevant_data");
        assert_eq!(json["provenance"]["type"], "none");
        assert_eq!(json["awaiting_confirmation"], false);
        assert!(json["verdict"].is_null());
    }
}
