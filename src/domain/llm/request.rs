use serde::{Deserialize, Serialize};

use super::Message;

/// One completion call
///
/// Every prompt in this crate is grounded in supplied context, so requests
/// are deterministic (temperature 0) unless a caller says otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    pub messages: Vec<Message>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl LlmRequest {
    /// Single-turn request carrying one user prompt
    pub fn prompt(prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(prompt)],
            temperature: 0.0,
            max_tokens: None,
        }
    }

    /// Put a standing instruction ahead of the prompt
    pub fn with_system(mut self, instruction: impl Into<String>) -> Self {
        self.messages.insert(0, Message::system(instruction));
        self
    }

    /// Cap the reply length; verdicts need a handful of tokens, explanations more
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}
