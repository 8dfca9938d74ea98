//! Session management.
//!
//! # Shiro Equivalent
//! `org.apache.shiro.session.mgt.SessionManager` / `DefaultSessionManager`
//!
//! Sessions here are the engine's own work-unit state, not cookie-session
//! middleware; persistence is explicitly out of scope.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use parking_lot::Mutex;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    timeout: Duration,
}

impl SessionConfig {
    pub fn new() -> Self {
        SessionConfig {
            // Shiro's global session timeout default
            timeout: Duration::from_secs(30 * 60),
        }
    }

    /// Sets the idle timeout after which a session expires (builder pattern).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A single session: an id plus a string attribute map and idle tracking.
pub struct Session {
    id: String,
    timeout: Duration,
    last_access: Mutex<Instant>,
    attributes: Mutex<HashMap<String, String>>,
}

impl Session {
    fn new(timeout: Duration) -> Self {
        let id: String = thread_rng()
            .sample_iter(&Alphanumeric)
            .take(30)
            .map(char::from)
            .collect();
        Session {
            id,
            timeout,
            last_access: Mutex::new(Instant::now()),
            attributes: Mutex::new(HashMap::new()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn attribute(&self, key: &str) -> Option<String> {
        self.attributes.lock().get(key).cloned()
    }

    pub fn set_attribute(&self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.lock().insert(key.into(), value.into());
    }

    pub fn remove_attribute(&self, key: &str) -> Option<String> {
        self.attributes.lock().remove(key)
    }

    /// Marks the session as accessed, resetting the idle clock.
    pub fn touch(&self) {
        *self.last_access.lock() = Instant::now();
    }

    pub fn is_expired(&self) -> bool {
        self.last_access.lock().elapsed() > self.timeout
    }
}

/// Manages session lifecycle for all subjects.
///
/// # Shiro Equivalent
/// `SessionManager`
pub trait SessionManager: Send + Sync {
    /// Starts a new session.
    fn start(&self) -> Arc<Session>;

    /// Returns the live session with the given id, if any.
    fn get(&self, id: &str) -> Option<Arc<Session>>;

    /// Stops the session with the given id. No-op if absent.
    fn stop(&self, id: &str);
}

/// In-memory session manager keyed by session id.
pub struct MemorySessionManager {
    config: SessionConfig,
    sessions: DashMap<String, Arc<Session>>,
}

impl MemorySessionManager {
    pub fn new(config: SessionConfig) -> Self {
        MemorySessionManager {
            config,
            sessions: DashMap::new(),
        }
    }

    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }
}

impl Default for MemorySessionManager {
    fn default() -> Self {
        Self::new(SessionConfig::new())
    }
}

impl SessionManager for MemorySessionManager {
    fn start(&self) -> Arc<Session> {
        let session = Arc::new(Session::new(self.config.timeout));
        self.sessions.insert(session.id().to_string(), Arc::clone(&session));
        session
    }

    fn get(&self, id: &str) -> Option<Arc<Session>> {
        let session = self.sessions.get(id).map(|s| Arc::clone(&s))?;
        if session.is_expired() {
            self.sessions.remove(id);
            return None;
        }
        session.touch();
        Some(session)
    }

    fn stop(&self, id: &str) {
        self.sessions.remove(id);
    }
}
