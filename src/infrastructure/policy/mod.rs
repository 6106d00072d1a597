//! Fallback policy execution

mod agent;
mod guard;

pub use agent::FallbackAgent;
pub use guard::guarded;
