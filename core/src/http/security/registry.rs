//! Component registry: optional collaborators supplied by the embedding
//! application.
//!
//! The host's dependency-wiring layer (whatever it is) collects candidate
//! components here; the
//! [`SecurityManagerConfigurer`](crate::http::security::SecurityManagerConfigurer)
//! consumes the registry during assembly. Every slot accepts zero or more
//! candidates; registration order is preserved and is meaningful for the
//! realm slot, where all candidates install as an ordered set.

use std::sync::Arc;

use crate::http::security::authenticator::Authenticator;
use crate::http::security::authorizer::Authorizer;
use crate::http::security::cache::CacheManager;
use crate::http::security::environment::FilterChainResolver;
use crate::http::security::event::EventBus;
use crate::http::security::manager::{SubjectFactory, SubjectStore};
use crate::http::security::realm::Realm;
use crate::http::security::remember_me::RememberMeManager;
use crate::http::security::session::SessionManager;

#[derive(Default)]
pub struct ComponentRegistry {
    realms: Vec<Arc<dyn Realm>>,
    authenticators: Vec<Arc<dyn Authenticator>>,
    authorizers: Vec<Arc<dyn Authorizer>>,
    cache_managers: Vec<Arc<dyn CacheManager>>,
    event_buses: Vec<Arc<EventBus>>,
    subject_stores: Vec<Arc<dyn SubjectStore>>,
    subject_factories: Vec<Arc<dyn SubjectFactory>>,
    session_managers: Vec<Arc<dyn SessionManager>>,
    remember_me_managers: Vec<Arc<dyn RememberMeManager>>,
    filter_chain_resolvers: Vec<Arc<dyn FilterChainResolver>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_realm(mut self, realm: Arc<dyn Realm>) -> Self {
        self.realms.push(realm);
        self
    }

    pub fn register_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticators.push(authenticator);
        self
    }

    pub fn register_authorizer(mut self, authorizer: Arc<dyn Authorizer>) -> Self {
        self.authorizers.push(authorizer);
        self
    }

    pub fn register_cache_manager(mut self, cache_manager: Arc<dyn CacheManager>) -> Self {
        self.cache_managers.push(cache_manager);
        self
    }

    pub fn register_event_bus(mut self, event_bus: Arc<EventBus>) -> Self {
        self.event_buses.push(event_bus);
        self
    }

    pub fn register_subject_store(mut self, subject_store: Arc<dyn SubjectStore>) -> Self {
        self.subject_stores.push(subject_store);
        self
    }

    pub fn register_subject_factory(mut self, subject_factory: Arc<dyn SubjectFactory>) -> Self {
        self.subject_factories.push(subject_factory);
        self
    }

    pub fn register_session_manager(mut self, session_manager: Arc<dyn SessionManager>) -> Self {
        self.session_managers.push(session_manager);
        self
    }

    pub fn register_remember_me_manager(mut self, manager: Arc<dyn RememberMeManager>) -> Self {
        self.remember_me_managers.push(manager);
        self
    }

    pub fn register_filter_chain_resolver(
        mut self,
        resolver: Arc<dyn FilterChainResolver>,
    ) -> Self {
        self.filter_chain_resolvers.push(resolver);
        self
    }

    pub fn realms(&self) -> &[Arc<dyn Realm>] {
        &self.realms
    }

    pub fn authenticators(&self) -> &[Arc<dyn Authenticator>] {
        &self.authenticators
    }

    pub fn authorizers(&self) -> &[Arc<dyn Authorizer>] {
        &self.authorizers
    }

    pub fn cache_managers(&self) -> &[Arc<dyn CacheManager>] {
        &self.cache_managers
    }

    pub fn event_buses(&self) -> &[Arc<EventBus>] {
        &self.event_buses
    }

    pub fn subject_stores(&self) -> &[Arc<dyn SubjectStore>] {
        &self.subject_stores
    }

    pub fn subject_factories(&self) -> &[Arc<dyn SubjectFactory>] {
        &self.subject_factories
    }

    pub fn session_managers(&self) -> &[Arc<dyn SessionManager>] {
        &self.session_managers
    }

    pub fn remember_me_managers(&self) -> &[Arc<dyn RememberMeManager>] {
        &self.remember_me_managers
    }

    pub fn filter_chain_resolvers(&self) -> &[Arc<dyn FilterChainResolver>] {
        &self.filter_chain_resolvers
    }
}
