//! Security event bus.
//!
//! # Shiro Equivalent
//! `org.apache.shiro.event.EventBus`
//!
//! The engine publishes lifecycle events here; embedding applications
//! register handlers for audit trails, metrics, or anything else. This is
//! the crate's observability surface.
//!
//! # Example
//! ```ignore
//! let bus = EventBus::new().with_handler(|event| {
//!     eprintln!("[SECURITY] {event}");
//! });
//! bus.publish(&SecurityEvent::Logout { principal: "admin".into() });
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

/// Events published by the security engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecurityEvent {
    /// A login attempt succeeded.
    LoginSuccess { principal: String },
    /// A login attempt failed.
    LoginFailure { principal: String },
    /// A subject logged out.
    Logout { principal: String },
    /// A session was started for a subject.
    SessionStarted { id: String },
    /// A session was stopped.
    SessionStopped { id: String },
    /// The security manager finished assembly. Published once.
    ManagerConfigured,
}

impl fmt::Display for SecurityEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecurityEvent::LoginSuccess { principal } => {
                write!(f, "LOGIN_SUCCESS principal={principal}")
            }
            SecurityEvent::LoginFailure { principal } => {
                write!(f, "LOGIN_FAILURE principal={principal}")
            }
            SecurityEvent::Logout { principal } => write!(f, "LOGOUT principal={principal}"),
            SecurityEvent::SessionStarted { id } => write!(f, "SESSION_STARTED id={id}"),
            SecurityEvent::SessionStopped { id } => write!(f, "SESSION_STOPPED id={id}"),
            SecurityEvent::ManagerConfigured => write!(f, "MANAGER_CONFIGURED"),
        }
    }
}

type EventHandler = Arc<dyn Fn(&SecurityEvent) + Send + Sync>;

/// Synchronous broadcast bus for [`SecurityEvent`]s.
///
/// Handlers run inline on the publishing thread, in registration order.
#[derive(Default)]
pub struct EventBus {
    handlers: RwLock<Vec<EventHandler>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler (builder pattern).
    pub fn with_handler<F>(self, handler: F) -> Self
    where
        F: Fn(&SecurityEvent) + Send + Sync + 'static,
    {
        self.register(handler);
        self
    }

    /// Registers a handler on a shared bus.
    pub fn register<F>(&self, handler: F)
    where
        F: Fn(&SecurityEvent) + Send + Sync + 'static,
    {
        self.handlers.write().push(Arc::new(handler));
    }

    pub fn publish(&self, event: &SecurityEvent) {
        for handler in self.handlers.read().iter() {
            handler(event);
        }
    }
}
