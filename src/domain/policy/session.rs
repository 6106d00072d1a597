//! Per-session confirmation state
//!
//! The only mutable state of the policy. It is passed into each agent call and
//! returned updated, so callers decide where (and whether) it is stored.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Web-search confirmation lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ConfirmationState {
    #[default]
    Idle,
    /// A disclosure was shown and a web search is pending user consent
    AwaitingConfirm {
        pending_query: String,
        requested_turn: u64,
        requested_at: DateTime<Utc>,
    },
    /// Consent given; the web search for `query` is in flight
    Searching { query: String },
}

/// State carried between turns of one conversation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionState {
    confirmation: ConfirmationState,
    turn: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirmation(&self) -> &ConfirmationState {
        &self.confirmation
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn is_awaiting_confirmation(&self) -> bool {
        matches!(self.confirmation, ConfirmationState::AwaitingConfirm { .. })
    }

    /// Advance to the next turn
    pub fn begin_turn(&mut self) -> u64 {
        self.turn += 1;
        self.turn
    }

    pub fn await_confirmation(&mut self, query: impl Into<String>, now: DateTime<Utc>) {
        self.confirmation = ConfirmationState::AwaitingConfirm {
            pending_query: query.into(),
            requested_turn: self.turn,
            requested_at: now,
        };
    }

    /// The pending query if a confirmation asked on the previous turn is still fresh
    pub fn pending_confirmation(&self, now: DateTime<Utc>, ttl_secs: u64) -> Option<&str> {
        match &self.confirmation {
            ConfirmationState::AwaitingConfirm {
                pending_query,
                requested_turn,
                requested_at,
            } => {
                let ttl = Duration::seconds(i64::try_from(ttl_secs).unwrap_or(i64::MAX));
                let next_turn = *requested_turn + 1 == self.turn;
                let fresh = now.signed_duration_since(*requested_at) <= ttl;

                (next_turn && fresh).then_some(pending_query.as_str())
            }
            _ => None,
        }
    }

    pub fn begin_search(&mut self, query: impl Into<String>) {
        self.confirmation = ConfirmationState::Searching {
            query: query.into(),
        };
    }

    pub fn reset(&mut self) {
        self.confirmation = ConfirmationState::Idle;
    }
}

/// How a user turn answers a pending confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationReply {
    Affirm,
    Deny,
    /// Not an answer to the confirmation; treated as a new query
    Unrelated,
}

const AFFIRMATIONS: &[&str] = &[
    "yes", "y", "yeah", "yep", "sure", "ok", "okay", "go ahead", "search", "search the web",
    "please do", "do it", "confirm",
];

const DENIALS: &[&str] = &["no", "n", "nope", "nah", "cancel", "don't", "dont", "stop", "skip"];

impl ConfirmationReply {
    /// Classify a free-text reply; only whole-reply matches count
    pub fn parse(text: &str) -> Self {
        let normalized = text
            .trim()
            .trim_end_matches(|c: char| c.is_ascii_punctuation() && c != '\'')
            .trim()
            .to_lowercase();

        if AFFIRMATIONS.contains(&normalized.as_str()) {
            Self::Affirm
        } else if DENIALS.contains(&normalized.as_str()) {
            Self::Deny
        } else {
            Self::Unrelated
        }
    }

    /// An explicit flag wins over the reply text
    pub fn resolve(flag: Option<bool>, text: &str) -> Self {
        match flag {
            Some(true) => Self::Affirm,
            Some(false) => Self::Deny,
            None => Self::parse(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn awaiting_session(now: DateTime<Utc>) -> SessionState {
        let mut session = SessionState::new();
        session.begin_turn();
        session.await_confirmation("weather in Paris", now);
        session
    }

    #[test]
    fn test_pending_valid_on_next_turn() {
        let now = Utc::now();
        let mut session = awaiting_session(now);
        session.begin_turn();

        assert_eq!(
            session.pending_confirmation(now + Duration::seconds(10), 300),
            Some("weather in Paris")
        );
    }

    #[test]
    fn test_pending_expires_after_one_turn() {
        let now = Utc::now();
        let mut session = awaiting_session(now);
        session.begin_turn();
        session.begin_turn();

        assert_eq!(session.pending_confirmation(now, 300), None);
    }

    #[test]
    fn test_pending_expires_after_ttl() {
        let now = Utc::now();
        let mut session = awaiting_session(now);
        session.begin_turn();

        assert_eq!(session.pending_confirmation(now + Duration::seconds(301), 300), None);
    }

    #[test]
    fn test_state_transitions() {
        let now = Utc::now();
        let mut session = awaiting_session(now);
        assert!(session.is_awaiting_confirmation());

        session.begin_search("weather in Paris");
        assert_eq!(
            session.confirmation(),
            &ConfirmationState::Searching {
                query: "weather in Paris".to_string()
            }
        );

        session.reset();
        assert_eq!(session.confirmation(), &ConfirmationState::Idle);
        assert_eq!(session.turn(), 1);
    }

    #[test]
    fn test_reply_parsing() {
        assert_eq!(ConfirmationReply::parse("Yes!"), ConfirmationReply::Affirm);
        assert_eq!(ConfirmationReply::parse(" go ahead "), ConfirmationReply::Affirm);
        assert_eq!(ConfirmationReply::parse("nope."), ConfirmationReply::Deny);
        assert_eq!(ConfirmationReply::parse("don't"), ConfirmationReply::Deny);
        assert_eq!(
            ConfirmationReply::parse("yes, and what about gold?"),
            ConfirmationReply::Unrelated
        );
    }

    #[test]
    fn test_explicit_flag_wins() {
        assert_eq!(ConfirmationReply::resolve(Some(true), "no"), ConfirmationReply::Affirm);
        assert_eq!(ConfirmationReply::resolve(Some(false), "yes"), ConfirmationReply::Deny);
        assert_eq!(ConfirmationReply::resolve(None, "sure"), ConfirmationReply::Affirm);
    }
}
