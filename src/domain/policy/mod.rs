//! Fallback policy domain
//!
//! Decisions, per-session confirmation state and the pure routing rules the
//! agent applies to retrieval signals.

mod config;
mod decision;
mod request;
mod rules;
mod session;

pub use config::PolicyConfig;
pub use decision::{DeclineReason, Decision, PolicyOutcome, PolicySignals, Provenance};
pub use request::PolicyRequest;
pub use rules::{accept_verdict, route, Route};
pub use session::{ConfirmationReply, ConfirmationState, SessionState};
