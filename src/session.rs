// src/session.rs
// Session store abstraction and the in-process implementation

pub mod cookie;
pub mod history;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

use history::ConversationHistory;

pub use cookie::{SessionKeys, generate_session_id};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session store error: {0}")]
    Store(String),
}

/// Everything kept for one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub history: ConversationHistory,
    pub last_interaction: Option<DateTime<Utc>>,
}

/// Summary reported by `/session-info`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionInfo {
    pub session_active: bool,
    pub message_count: usize,
    pub last_interaction: Option<DateTime<Utc>>,
}

impl SessionData {
    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            session_active: !self.history.is_empty(),
            message_count: self.history.pair_count(),
            last_interaction: self.last_interaction,
        }
    }

    pub fn touch(&mut self) {
        self.last_interaction = Some(Utc::now());
    }
}

/// Key-value store for session data, keyed by session id.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, session_id: &str) -> Result<Option<SessionData>, SessionError>;
    async fn set(&self, session_id: &str, data: SessionData) -> Result<(), SessionError>;
    async fn delete(&self, session_id: &str) -> Result<(), SessionError>;
}

pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(60 * 60);
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

struct StoredSession {
    data: SessionData,
    touched_at: DateTime<Utc>,
}

/// Process-local store. Contents are lost on restart.
///
/// Sessions idle for longer than `idle_ttl` are dropped, and once
/// `max_sessions` is reached the least recently written one makes room.
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, StoredSession>>,
    idle_ttl: Duration,
    max_sessions: usize,
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::with_limits(DEFAULT_IDLE_TTL, DEFAULT_MAX_SESSIONS)
    }
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(idle_ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Oldest write time still considered live. `None` when the TTL is too
    /// large to represent, in which case nothing expires.
    fn cutoff(&self) -> Option<DateTime<Utc>> {
        let ttl = chrono::Duration::from_std(self.idle_ttl).ok()?;
        Utc::now().checked_sub_signed(ttl)
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, session_id: &str) -> Result<Option<SessionData>, SessionError> {
        let cutoff = self.cutoff();
        Ok(self
            .sessions
            .read()
            .await
            .get(session_id)
            .filter(|stored| cutoff.is_none_or(|cutoff| stored.touched_at >= cutoff))
            .map(|stored| stored.data.clone()))
    }

    async fn set(&self, session_id: &str, data: SessionData) -> Result<(), SessionError> {
        let cutoff = self.cutoff();
        let mut sessions = self.sessions.write().await;

        if let Some(cutoff) = cutoff {
            let before = sessions.len();
            sessions.retain(|_, stored| stored.touched_at >= cutoff);
            let expired = before - sessions.len();
            if expired > 0 {
                debug!("Expired {} idle sessions", expired);
            }
        }

        if !sessions.contains_key(session_id) && sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, stored)| stored.touched_at)
                .map(|(id, _)| id.clone());
            if let Some(oldest) = oldest {
                sessions.remove(&oldest);
                debug!("Session store full; evicted least recently used session");
            }
        }

        sessions.insert(
            session_id.to_string(),
            StoredSession {
                data,
                touched_at: Utc::now(),
            },
        );
        Ok(())
    }

    async fn delete(&self, session_id: &str) -> Result<(), SessionError> {
        self.sessions.write().await.remove(session_id);
        Ok(())
    }
}
