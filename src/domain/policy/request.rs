use serde::{Deserialize, Serialize};

/// One user turn handed to the agent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyRequest {
    pub query: String,
    /// Optional `YYYY-MM-DD` date the query refers to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<String>,
    /// Explicit answer to a pending web-search confirmation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm_web_search: Option<bool>,
}

impl PolicyRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            reference_date: None,
            confirm_web_search: None,
        }
    }

    pub fn with_reference_date(mut self, date: impl Into<String>) -> Self {
        self.reference_date = Some(date.into());
        self
    }

    pub fn with_confirmation(mut self, confirm: bool) -> Self {
        self.confirm_web_search = Some(confirm);
        self
    }
}
