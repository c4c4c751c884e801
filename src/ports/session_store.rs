//! Session Store Port - Keyed ownership of live teaching sessions.
//!
//! The store is the only owner of `TeachingSession` values. Each session is
//! handed out behind its own async mutex so a caller can hold it across the
//! slow generator call: turns on one session are serialised, turns on
//! different sessions never contend.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::foundation::SessionId;
use crate::domain::teaching::{SessionSettings, TeachingSession};

/// Handle to a stored session. Lock it to read or mutate the session.
pub type SharedSession = Arc<Mutex<TeachingSession>>;

/// Port for session lifecycle.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Creates and stores a fresh session, returning a snapshot of it.
    async fn create(&self, settings: SessionSettings) -> TeachingSession;

    /// Looks up a session. `None` when the id is unknown or already removed.
    async fn get(&self, id: &SessionId) -> Option<SharedSession>;

    /// Removes a session. Removing an absent session is a no-op.
    async fn delete(&self, id: &SessionId);

    /// Number of live sessions.
    async fn count(&self) -> usize;
}
