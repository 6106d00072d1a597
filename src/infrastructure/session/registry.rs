//! Per-session policy state backed by moka

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use crate::domain::policy::SessionState;

/// Registry sizing and eviction
#[derive(Debug, Clone)]
pub struct SessionRegistryConfig {
    /// Maximum number of tracked sessions
    pub max_capacity: u64,
    /// Sessions not touched for this long are evicted
    pub time_to_idle: Duration,
}

impl Default for SessionRegistryConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            time_to_idle: Duration::from_secs(1800),
        }
    }
}

impl SessionRegistryConfig {
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }

    pub fn with_time_to_idle(mut self, tti: Duration) -> Self {
        self.time_to_idle = tti;
        self
    }
}

/// Session states keyed by client-supplied session id
///
/// Each session sits behind its own async mutex. A caller holds the guard
/// from [`SessionRegistry::lock`] for the whole turn, so turns on one session
/// run one after another while different sessions proceed in parallel.
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    sessions: MokaCache<String, Arc<Mutex<SessionState>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::with_config(SessionRegistryConfig::default())
    }

    pub fn with_config(config: SessionRegistryConfig) -> Self {
        let sessions = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .time_to_idle(config.time_to_idle)
            .build();

        Self { sessions }
    }

    /// Exclusive access to the state of `session_id`, created fresh if unknown
    pub async fn lock(&self, session_id: &str) -> OwnedMutexGuard<SessionState> {
        let slot = self
            .sessions
            .get_with(session_id.to_string(), async {
                Arc::new(Mutex::new(SessionState::default()))
            })
            .await;

        slot.lock_owned().await
    }

    /// Snapshot of the current state, waiting for an in-flight turn to finish
    pub async fn get(&self, session_id: &str) -> SessionState {
        match self.sessions.get(session_id).await {
            Some(slot) => slot.lock().await.clone(),
            None => SessionState::default(),
        }
    }

    /// Forget a session; returns whether it existed
    ///
    /// A turn already holding the lock finishes against the detached state.
    pub async fn remove(&self, session_id: &str) -> bool {
        let removed = self.sessions.remove(session_id).await.is_some();
        debug!(session_id, removed, "Session removed");
        removed
    }

    pub async fn len(&self) -> u64 {
        self.sessions.run_pending_tasks().await;
        self.sessions.entry_count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
