use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::core::SwipeSession;

/// A session behind its own lock: one gesture at a time per user
pub type SharedSession = Arc<Mutex<SwipeSession>>;

/// Active swipe sessions keyed by user id
///
/// Sessions idle for longer than the TTL are evicted; the next deck load
/// rebuilds them from the stores.
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: moka::future::Cache<String, SharedSession>,
}

impl SessionRegistry {
    pub fn new(capacity: u64, idle_ttl_secs: u64) -> Self {
        let sessions = moka::future::CacheBuilder::new(capacity)
            .time_to_idle(Duration::from_secs(idle_ttl_secs))
            .build();

        Self { sessions }
    }

    pub async fn get(&self, user_id: &str) -> Option<SharedSession> {
        let session = self.sessions.get(user_id).await;
        if session.is_none() {
            tracing::trace!("No active session for {}", user_id);
        }
        session
    }

    /// Store `session`, replacing any previous one for the same user
    pub async fn insert(&self, session: SwipeSession) -> SharedSession {
        let user_id = session.user_id().to_string();
        let shared = Arc::new(Mutex::new(session));
        self.sessions.insert(user_id.clone(), shared.clone()).await;

        tracing::debug!("Session stored for {}", user_id);
        shared
    }

    pub async fn remove(&self, user_id: &str) {
        self.sessions.invalidate(user_id).await;
    }

    /// Approximate number of live sessions
    pub fn len(&self) -> u64 {
        self.sessions.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
