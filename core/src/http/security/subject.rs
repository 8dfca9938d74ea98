//! Subjects: the principal bound to one logical request.
//!
//! # Shiro Equivalent
//! `org.apache.shiro.subject.Subject` / `DelegatingSubject`
//!
//! A `Subject` holds no security logic of its own; every identity,
//! permission, and session question is delegated to its
//! [`SecurityManager`]. Cloning a `Subject` shares the underlying state,
//! so a login performed through one clone is visible through every other
//! handle on the same logical subject.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::http::error::{AuthenticationError, AuthorizationError};
use crate::http::security::context;
use crate::http::security::event::SecurityEvent;
use crate::http::security::manager::SecurityManager;
use crate::http::security::session::Session;

/// Username/password authentication token.
///
/// # Shiro Equivalent
/// `UsernamePasswordToken`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsernamePasswordToken {
    username: String,
    password: String,
    remember_me: bool,
}

impl UsernamePasswordToken {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        UsernamePasswordToken {
            username: username.into(),
            password: password.into(),
            remember_me: false,
        }
    }

    /// Requests a remembered identity on successful login (builder pattern).
    pub fn remember_me(mut self, remember_me: bool) -> Self {
        self.remember_me = remember_me;
        self
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn is_remember_me(&self) -> bool {
        self.remember_me
    }
}

#[derive(Default)]
struct SubjectState {
    principal: Option<String>,
    authenticated: bool,
    remembered: bool,
    session: Option<Arc<Session>>,
}

/// The authenticated-or-anonymous principal for one logical request.
#[derive(Clone)]
pub struct Subject {
    manager: Arc<SecurityManager>,
    state: Arc<RwLock<SubjectState>>,
}

// Manual impl: the manager is a bag of trait objects.
impl fmt::Debug for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Subject")
            .field("principal", &state.principal)
            .field("authenticated", &state.authenticated)
            .field("remembered", &state.remembered)
            .field("session", &state.session.as_ref().map(|s| s.id()))
            .finish()
    }
}

impl Subject {
    pub(crate) fn new(
        manager: Arc<SecurityManager>,
        principal: Option<String>,
        authenticated: bool,
        remembered: bool,
        session: Option<Arc<Session>>,
    ) -> Self {
        Subject {
            manager,
            state: Arc::new(RwLock::new(SubjectState {
                principal,
                authenticated,
                remembered,
                session,
            })),
        }
    }

    pub fn manager(&self) -> &Arc<SecurityManager> {
        &self.manager
    }

    /// Returns the subject's principal, or `None` for an anonymous subject.
    pub fn principal(&self) -> Option<String> {
        self.state.read().principal.clone()
    }

    /// True only if this subject proved its identity during the current
    /// interaction; remembered identities do not count.
    pub fn is_authenticated(&self) -> bool {
        self.state.read().authenticated
    }

    /// True if the identity was restored from a remember-me source.
    pub fn is_remembered(&self) -> bool {
        self.state.read().remembered
    }

    pub fn has_role(&self, role: &str) -> bool {
        match self.principal() {
            Some(principal) => self.manager.has_role(&principal, role),
            None => false,
        }
    }

    pub fn is_permitted(&self, permission: &str) -> bool {
        match self.principal() {
            Some(principal) => self.manager.is_permitted(&principal, permission),
            None => false,
        }
    }

    /// Fails with [`AuthorizationError`] unless the subject holds the role.
    pub fn check_role(&self, role: &str) -> Result<(), AuthorizationError> {
        let principal = self.principal().ok_or(AuthorizationError::Unauthenticated)?;
        if self.manager.has_role(&principal, role) {
            Ok(())
        } else {
            Err(AuthorizationError::MissingRole(role.to_string()))
        }
    }

    /// Fails with [`AuthorizationError`] unless the subject holds the
    /// permission.
    pub fn check_permission(&self, permission: &str) -> Result<(), AuthorizationError> {
        let principal = self.principal().ok_or(AuthorizationError::Unauthenticated)?;
        if self.manager.is_permitted(&principal, permission) {
            Ok(())
        } else {
            Err(AuthorizationError::MissingPermission(permission.to_string()))
        }
    }

    /// Authenticates this subject with the given token.
    ///
    /// On success the new identity is visible through every clone of this
    /// subject. The engine's error propagates unchanged on failure.
    pub fn login(&self, token: &UsernamePasswordToken) -> Result<(), AuthenticationError> {
        let account = match self.manager.authenticate(token) {
            Ok(account) => account,
            Err(err) => {
                self.manager.publish(&SecurityEvent::LoginFailure {
                    principal: token.username().to_string(),
                });
                return Err(err);
            }
        };

        {
            let mut state = self.state.write();
            state.principal = Some(account.principal().to_string());
            state.authenticated = true;
            state.remembered = false;
        }
        if token.is_remember_me() {
            if let Some(remember_me) = self.manager.remember_me_manager() {
                remember_me.remember(&account);
            }
        }
        self.manager.save_subject(self);
        self.manager.publish(&SecurityEvent::LoginSuccess {
            principal: account.principal().to_string(),
        });
        Ok(())
    }

    /// Logs out: forgets remembered identity, stops the session, and
    /// reverts this subject to anonymous.
    pub fn logout(&self) {
        // The store must see the subject while it still has its identity
        // and session, or it cannot clear what it persisted.
        self.manager.delete_subject(self);

        let (principal, session) = {
            let mut state = self.state.write();
            let principal = state.principal.take();
            state.authenticated = false;
            state.remembered = false;
            (principal, state.session.take())
        };

        if let Some(ref principal) = principal {
            if let Some(remember_me) = self.manager.remember_me_manager() {
                remember_me.forget(principal);
            }
        }
        if let Some(session) = session {
            self.manager.stop_session(session.id());
        }
        if let Some(principal) = principal {
            self.manager.publish(&SecurityEvent::Logout { principal });
        }
    }

    /// Returns the subject's session, if one exists.
    pub fn session(&self) -> Option<Arc<Session>> {
        self.state.read().session.clone()
    }

    /// Returns the subject's session, starting one if the manager has a
    /// session-manager slot. `None` when sessions are unconfigured.
    pub fn session_or_create(&self) -> Option<Arc<Session>> {
        if let Some(session) = self.session() {
            return Some(session);
        }
        let session = self.manager.start_session()?;
        self.state.write().session = Some(Arc::clone(&session));
        Some(session)
    }

    /// Associates this subject with a unit of work, so code running inside
    /// the returned future observes it as the current subject even with no
    /// context binding in place.
    ///
    /// # Shiro Equivalent
    /// `Subject.associateWith(Runnable)`
    pub fn associate_with<F>(&self, work: F) -> impl Future<Output = F::Output>
    where
        F: Future,
    {
        context::associate(self.clone(), work)
    }
}
