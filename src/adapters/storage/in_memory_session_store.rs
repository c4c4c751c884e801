//! In-Memory Session Store Adapter
//!
//! Keeps live teaching sessions in a process-wide map. Sessions vanish on
//! restart; there is no expiry, so a session lives until it is ended.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::foundation::SessionId;
use crate::domain::teaching::{SessionSettings, TeachingSession};
use crate::ports::{SessionStore, SharedSession};

/// In-memory keyed store of teaching sessions
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SharedSession>>>,
}

impl InMemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every session (used on shutdown and in tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, settings: SessionSettings) -> TeachingSession {
        let mut sessions = self.sessions.write().await;

        let mut id = SessionId::new();
        while sessions.contains_key(&id) {
            id = SessionId::new();
        }

        let session = TeachingSession::new(id, settings);
        sessions.insert(id, Arc::new(Mutex::new(session.clone())));
        session
    }

    async fn get(&self, id: &SessionId) -> Option<SharedSession> {
        self.sessions.read().await.get(id).cloned()
    }

    async fn delete(&self, id: &SessionId) {
        self.sessions.write().await.remove(id);
    }

    async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
