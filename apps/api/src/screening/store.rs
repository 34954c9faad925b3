use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::screening::session::Session;

/// In-memory sessions keyed by the id held in the browser cookie.
/// Sessions never touch each other; nothing outlives the process.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of an existing session, or creates a fresh one.
    pub async fn ensure(&self, id: Option<Uuid>) -> Uuid {
        let mut sessions = self.inner.write().await;
        if let Some(id) = id.filter(|id| sessions.contains_key(id)) {
            return id;
        }
        let id = Uuid::new_v4();
        sessions.insert(id, Session::new());
        tracing::info!("Created session {id}");
        id
    }

    /// Copy of a session, for work that must not hold the lock (model calls).
    pub async fn snapshot(&self, id: Uuid) -> Option<Session> {
        self.inner.read().await.get(&id).cloned()
    }

    /// Runs `f` against a session under the write lock.
    pub async fn update<T>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> T) -> Option<T> {
        let mut sessions = self.inner.write().await;
        sessions.get_mut(&id).map(f)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}
