//! The security manager: top-level coordinator for all subjects.
//!
//! # Shiro Equivalent
//! `org.apache.shiro.mgt.SecurityManager` / `DefaultSecurityManager`
//!
//! A manager is a bag of collaborator slots, each either explicitly
//! configured, filled in from a [`ComponentRegistry`] during assembly, or
//! (where a default exists) a built-in. After
//! [`SecurityManagerConfigurer::configure_manager`] runs, the manager is
//! wrapped in an `Arc` and never mutated again.
//!
//! [`ComponentRegistry`]: crate::http::security::ComponentRegistry
//! [`SecurityManagerConfigurer::configure_manager`]:
//! crate::http::security::SecurityManagerConfigurer::configure_manager

use std::fmt;
use std::sync::Arc;

use crate::http::error::AuthenticationError;
use crate::http::security::authenticator::{Authenticator, RealmAuthenticator};
use crate::http::security::authorizer::{Authorizer, RealmAuthorizer};
use crate::http::security::cache::CacheManager;
use crate::http::security::event::{EventBus, SecurityEvent};
use crate::http::security::realm::{AccountInfo, Realm};
use crate::http::security::remember_me::RememberMeManager;
use crate::http::security::session::{Session, SessionManager};
use crate::http::security::subject::{Subject, UsernamePasswordToken};

/// Hints for building a subject: a known principal, a remembered-identity
/// hint, or an existing session to reattach.
///
/// # Shiro Equivalent
/// `SubjectContext`
#[derive(Debug, Clone, Default)]
pub struct SubjectContext {
    principal: Option<String>,
    authenticated: bool,
    remembered_principal: Option<String>,
    session_id: Option<String>,
}

impl SubjectContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an already-proven principal (builder pattern).
    pub fn principal(mut self, principal: impl Into<String>) -> Self {
        self.principal = Some(principal.into());
        self.authenticated = true;
        self
    }

    /// Sets a remember-me hint to be validated against the remember-me
    /// manager (builder pattern).
    pub fn remembered_principal(mut self, principal: impl Into<String>) -> Self {
        self.remembered_principal = Some(principal.into());
        self
    }

    /// Reattaches an existing session by id (builder pattern).
    pub fn session_id(mut self, id: impl Into<String>) -> Self {
        self.session_id = Some(id.into());
        self
    }
}

/// Builds subjects from a [`SubjectContext`].
///
/// # Shiro Equivalent
/// `SubjectFactory`
pub trait SubjectFactory: Send + Sync {
    fn create_subject(&self, manager: &Arc<SecurityManager>, ctx: SubjectContext) -> Subject;
}

/// The built-in subject factory, installed during assembly when no other
/// factory is configured or registered.
///
/// Environment-aware: it consults the manager's remember-me and session
/// slots when present, and degrades to plain anonymous subjects when they
/// are not.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultSubjectFactory;

impl SubjectFactory for DefaultSubjectFactory {
    fn create_subject(&self, manager: &Arc<SecurityManager>, ctx: SubjectContext) -> Subject {
        let mut principal = ctx.principal;
        let authenticated = ctx.authenticated && principal.is_some();
        let mut remembered = false;

        if principal.is_none() {
            if let (Some(hint), Some(remember_me)) =
                (ctx.remembered_principal, manager.remember_me_manager())
            {
                if let Some(account) = remember_me.remembered(&hint) {
                    principal = Some(account.principal().to_string());
                    remembered = true;
                }
            }
        }

        let session = ctx
            .session_id
            .as_deref()
            .and_then(|id| manager.session_manager().and_then(|m| m.get(id)));

        Subject::new(
            Arc::clone(manager),
            principal,
            authenticated,
            remembered,
            session,
        )
    }
}

/// Persists or discards subject state at identity-change points.
///
/// # Shiro Equivalent
/// `SubjectDAO` / `DefaultSubjectDAO`
pub trait SubjectStore: Send + Sync {
    fn save(&self, subject: &Subject);
    fn delete(&self, subject: &Subject);
}

/// Stores the principal into the subject's session, if it has one.
/// Subjects without a session are simply not persisted.
#[derive(Debug, Default, Clone, Copy)]
pub struct SessionSubjectStore;

/// Session attribute carrying the persisted principal.
pub const PRINCIPAL_SESSION_KEY: &str = "actix-shiro.principal";

impl SubjectStore for SessionSubjectStore {
    fn save(&self, subject: &Subject) {
        if let (Some(session), Some(principal)) = (subject.session(), subject.principal()) {
            session.set_attribute(PRINCIPAL_SESSION_KEY, principal);
        }
    }

    fn delete(&self, subject: &Subject) {
        if let Some(session) = subject.session() {
            session.remove_attribute(PRINCIPAL_SESSION_KEY);
        }
    }
}

/// Top-level security component coordinating authentication, authorization,
/// sessions, and caching for all subjects.
#[derive(Default)]
pub struct SecurityManager {
    realms: Vec<Arc<dyn Realm>>,
    authenticator: Option<Arc<dyn Authenticator>>,
    authorizer: Option<Arc<dyn Authorizer>>,
    cache_manager: Option<Arc<dyn CacheManager>>,
    event_bus: Option<Arc<EventBus>>,
    subject_store: Option<Arc<dyn SubjectStore>>,
    subject_factory: Option<Arc<dyn SubjectFactory>>,
    session_manager: Option<Arc<dyn SessionManager>>,
    remember_me_manager: Option<Arc<dyn RememberMeManager>>,
}

// Manual impl: the slots are trait objects. Showing which slots are
// filled is what matters for diagnosing assembly.
impl fmt::Debug for SecurityManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityManager")
            .field(
                "realms",
                &self.realms.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .field("authenticator", &self.authenticator.is_some())
            .field("authorizer", &self.authorizer.is_some())
            .field("cache_manager", &self.cache_manager.is_some())
            .field("event_bus", &self.event_bus.is_some())
            .field("subject_store", &self.subject_store.is_some())
            .field("subject_factory", &self.subject_factory.is_some())
            .field("session_manager", &self.session_manager.is_some())
            .field("remember_me_manager", &self.remember_me_manager.is_some())
            .finish()
    }
}

impl SecurityManager {
    pub fn new() -> Self {
        Self::default()
    }

    // Builder-style slot setters, used both by embedding applications
    // (explicit configuration, which wins over the registry) and by the
    // configurer during assembly.

    pub fn with_realm(mut self, realm: Arc<dyn Realm>) -> Self {
        self.realms.push(realm);
        self
    }

    pub fn set_realms(mut self, realms: Vec<Arc<dyn Realm>>) -> Self {
        self.realms = realms;
        self
    }

    pub fn set_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    pub fn set_authorizer(mut self, authorizer: Arc<dyn Authorizer>) -> Self {
        self.authorizer = Some(authorizer);
        self
    }

    pub fn set_cache_manager(mut self, cache_manager: Arc<dyn CacheManager>) -> Self {
        self.cache_manager = Some(cache_manager);
        self
    }

    pub fn set_event_bus(mut self, event_bus: Arc<EventBus>) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    pub fn set_subject_store(mut self, subject_store: Arc<dyn SubjectStore>) -> Self {
        self.subject_store = Some(subject_store);
        self
    }

    pub fn set_subject_factory(mut self, subject_factory: Arc<dyn SubjectFactory>) -> Self {
        self.subject_factory = Some(subject_factory);
        self
    }

    pub fn set_session_manager(mut self, session_manager: Arc<dyn SessionManager>) -> Self {
        self.session_manager = Some(session_manager);
        self
    }

    pub fn set_remember_me_manager(mut self, manager: Arc<dyn RememberMeManager>) -> Self {
        self.remember_me_manager = Some(manager);
        self
    }

    // Slot accessors. The configurer reads these to decide which slots are
    // already explicitly configured.

    pub fn realms(&self) -> &[Arc<dyn Realm>] {
        &self.realms
    }

    pub fn authenticator(&self) -> Option<&Arc<dyn Authenticator>> {
        self.authenticator.as_ref()
    }

    pub fn authorizer(&self) -> Option<&Arc<dyn Authorizer>> {
        self.authorizer.as_ref()
    }

    pub fn cache_manager(&self) -> Option<&Arc<dyn CacheManager>> {
        self.cache_manager.as_ref()
    }

    pub fn event_bus(&self) -> Option<&Arc<EventBus>> {
        self.event_bus.as_ref()
    }

    pub fn subject_store(&self) -> Option<&Arc<dyn SubjectStore>> {
        self.subject_store.as_ref()
    }

    pub fn subject_factory(&self) -> Option<&Arc<dyn SubjectFactory>> {
        self.subject_factory.as_ref()
    }

    pub fn session_manager(&self) -> Option<&Arc<dyn SessionManager>> {
        self.session_manager.as_ref()
    }

    pub fn remember_me_manager(&self) -> Option<&Arc<dyn RememberMeManager>> {
        self.remember_me_manager.as_ref()
    }

    /// Authenticates a token through the configured authenticator, falling
    /// back to the first-successful realm strategy.
    pub fn authenticate(
        &self,
        token: &UsernamePasswordToken,
    ) -> Result<AccountInfo, AuthenticationError> {
        match &self.authenticator {
            Some(authenticator) => authenticator.authenticate(&self.realms, token),
            None => RealmAuthenticator.authenticate(&self.realms, token),
        }
    }

    pub fn has_role(&self, principal: &str, role: &str) -> bool {
        match &self.authorizer {
            Some(authorizer) => authorizer.has_role(&self.realms, principal, role),
            None => RealmAuthorizer.has_role(&self.realms, principal, role),
        }
    }

    pub fn is_permitted(&self, principal: &str, permission: &str) -> bool {
        match &self.authorizer {
            Some(authorizer) => authorizer.is_permitted(&self.realms, principal, permission),
            None => RealmAuthorizer.is_permitted(&self.realms, principal, permission),
        }
    }

    /// Builds a subject through the configured factory, falling back to
    /// [`DefaultSubjectFactory`].
    pub fn create_subject(self: &Arc<Self>, ctx: SubjectContext) -> Subject {
        match &self.subject_factory {
            Some(factory) => factory.create_subject(self, ctx),
            None => DefaultSubjectFactory.create_subject(self, ctx),
        }
    }

    /// Starts a session if a session manager is configured.
    pub fn start_session(&self) -> Option<Arc<Session>> {
        let session = self.session_manager.as_ref()?.start();
        self.publish(&SecurityEvent::SessionStarted {
            id: session.id().to_string(),
        });
        Some(session)
    }

    pub fn stop_session(&self, id: &str) {
        if let Some(session_manager) = &self.session_manager {
            session_manager.stop(id);
            self.publish(&SecurityEvent::SessionStopped { id: id.to_string() });
        }
    }

    pub(crate) fn save_subject(&self, subject: &Subject) {
        if let Some(store) = &self.subject_store {
            store.save(subject);
        }
    }

    pub(crate) fn delete_subject(&self, subject: &Subject) {
        if let Some(store) = &self.subject_store {
            store.delete(subject);
        }
    }

    pub fn publish(&self, event: &SecurityEvent) {
        if let Some(bus) = &self.event_bus {
            bus.publish(event);
        }
    }
}
