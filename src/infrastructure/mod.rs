//! Infrastructure layer - External service implementations

pub mod embedding;
pub mod evidence;
pub mod llm;
pub mod logging;
pub mod observability;
pub mod policy;
pub mod release_notes;
pub mod retrieval;
pub mod session;
pub mod synthesis;
pub mod verification;
pub mod web_search;
