//! Per-client session state.
//!
//! Sessions live in a thread-safe `DashMap` keyed by an opaque random id.
//! The id travels in a signed cookie (see [`cookie`]); no other module looks
//! inside the cookie. Writes replace the whole record, so concurrent requests
//! of the same client resolve last-write-wins.

pub mod cookie;
pub mod middleware;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use uuid::Uuid;

pub use cookie::CookieCodec;
pub use middleware::{IssuedSession, SessionContext, session_layer};

/// Opaque session identifier (random UUID v4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Authentication state of one client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub authenticated: bool,
    /// Present only when authenticated
    pub username: Option<String>,
}

impl Session {
    pub fn authenticated_as(username: impl Into<String>) -> Self {
        Self {
            authenticated: true,
            username: Some(username.into()),
        }
    }

    /// Username of an authenticated session
    pub fn user(&self) -> Option<&str> {
        if self.authenticated {
            self.username.as_deref()
        } else {
            None
        }
    }
}

struct SessionEntry {
    session: Session,
    last_seen: Instant,
}

/// Thread-safe session store with idle expiry
pub struct SessionStore {
    store: DashMap<SessionId, SessionEntry>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            store: DashMap::new(),
            idle_timeout,
        }
    }

    /// Current state of a session, unauthenticated if unknown or expired.
    ///
    /// Refreshes the idle timer of live sessions.
    pub fn get(&self, id: &SessionId) -> Session {
        let now = Instant::now();
        if let Some(mut entry) = self.store.get_mut(id) {
            if now.duration_since(entry.last_seen) < self.idle_timeout {
                entry.last_seen = now;
                return entry.session.clone();
            }
        } else {
            return Session::default();
        }

        // Expired: drop it, unless a concurrent write refreshed it meanwhile
        self.store
            .remove_if(id, |_, entry| now.duration_since(entry.last_seen) >= self.idle_timeout);
        Session::default()
    }

    /// Mark a session as logged in. Idempotent, overwrites previous state.
    pub fn set_authenticated(&self, id: &SessionId, username: &str) {
        self.store.insert(
            *id,
            SessionEntry {
                session: Session::authenticated_as(username),
                last_seen: Instant::now(),
            },
        );
    }

    /// Log a session out
    pub fn clear(&self, id: &SessionId) {
        // An absent record reads back as the default unauthenticated session
        self.store.remove(id);
    }

    /// Drop every session idle for longer than the timeout
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.store.len();
        self.store
            .retain(|_, entry| now.duration_since(entry.last_seen) < self.idle_timeout);
        before.saturating_sub(self.store.len())
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

/// Periodically purge expired sessions
pub fn spawn_purge_task(store: Arc<SessionStore>, every: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let purged = store.purge_expired();
            if purged > 0 {
                tracing::debug!(purged, remaining = store.len(), "Purged expired sessions");
            }
        }
    })
}
