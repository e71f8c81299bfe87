//! In-memory wizard sessions.
//!
//! Each session owns one `Wizard`. Nothing here outlives the process: a
//! session is dropped when its assessment is confirmed or when it has been
//! idle longer than the configured TTL.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::assessment::wizard::Wizard;

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub wizard: Wizard,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl Session {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            wizard: Wizard::new(),
            created_at: now,
            last_active: now,
        }
    }
}

pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
    ttl: chrono::Duration,
}

impl SessionStore {
    pub fn new(ttl: chrono::Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Starts a fresh wizard and returns a snapshot of its session.
    pub async fn create(&self) -> Session {
        let session = Session::new(Utc::now());
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        debug!(session_id = %session.id, "Session created");
        session
    }

    pub async fn get(&self, id: Uuid) -> Option<Session> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Runs `f` against the session under the write lock and marks it active.
    /// Returns `None` if the session does not exist.
    pub async fn with_session<R>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id)?;
        session.last_active = Utc::now();
        Some(f(session))
    }

    pub async fn remove(&self, id: Uuid) -> Option<Session> {
        self.sessions.write().await.remove(&id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops sessions idle for longer than the TTL as of `now`. Returns how
    /// many were dropped.
    pub async fn prune_expired(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| now - s.last_active <= self.ttl);
        before - sessions.len()
    }
}

/// Periodically prunes idle sessions for the lifetime of the process.
pub fn spawn_sweeper(store: Arc<SessionStore>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let pruned = store.prune_expired(Utc::now()).await;
            if pruned > 0 {
                info!(pruned, "Pruned idle assessment sessions");
            }
        }
    })
}
