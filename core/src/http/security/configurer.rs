//! Security manager assembly.
//!
//! # Shiro Equivalent
//! The philosophy is: a slot already set on the manager was configured
//! explicitly by the embedding application and wins; otherwise the
//! registry value is used if there is exactly one; otherwise the slot
//! stays unset, except for the subject factory, which always gets the
//! built-in default.
//!
//! Assembly runs once per deployment, synchronously, and mutates the
//! manager in place. Afterwards the manager is read-only.

use std::sync::Arc;

use crate::http::error::ConfigError;
use crate::http::security::event::SecurityEvent;
use crate::http::security::manager::{DefaultSubjectFactory, SecurityManager, SubjectFactory};
use crate::http::security::registry::ComponentRegistry;

/// Resolves a singular slot from registry candidates.
///
/// Zero candidates leave the slot alone; exactly one installs; more than
/// one is a configuration error rather than iteration-order roulette.
pub(crate) fn single_candidate<T: ?Sized>(
    slot: &'static str,
    candidates: &[Arc<T>],
) -> Result<Option<Arc<T>>, ConfigError> {
    match candidates {
        [] => Ok(None),
        [only] => Ok(Some(Arc::clone(only))),
        many => Err(ConfigError::AmbiguousComponent {
            slot,
            count: many.len(),
        }),
    }
}

type ObservationHook = Box<dyn Fn(&SecurityManager) + Send + Sync>;

/// Assembles a fully-configured [`SecurityManager`] from a base manager
/// and a [`ComponentRegistry`].
#[derive(Default)]
pub struct SecurityManagerConfigurer {
    on_configured: Option<ObservationHook>,
}

impl SecurityManagerConfigurer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the observation hook, fired exactly once with the fully
    /// configured manager for last-mile customization (builder pattern).
    pub fn on_configured<F>(mut self, hook: F) -> Self
    where
        F: Fn(&SecurityManager) + Send + Sync + 'static,
    {
        self.on_configured = Some(Box::new(hook));
        self
    }

    /// Fills every unset collaborator slot on `manager` from the registry.
    ///
    /// Precedence per slot: explicit configuration on the manager wins;
    /// else a sole registry candidate installs; else the slot stays unset.
    /// Two exceptions: the realm slot takes all registry candidates as an
    /// ordered set, and the subject-factory slot falls back to
    /// [`DefaultSubjectFactory`] when nothing else supplied one.
    pub fn configure_manager(
        &self,
        mut manager: SecurityManager,
        registry: &ComponentRegistry,
    ) -> Result<SecurityManager, ConfigError> {
        if manager.realms().is_empty() && !registry.realms().is_empty() {
            manager = manager.set_realms(registry.realms().to_vec());
        }
        if manager.authenticator().is_none() {
            if let Some(authenticator) =
                single_candidate("authenticator", registry.authenticators())?
            {
                manager = manager.set_authenticator(authenticator);
            }
        }
        if manager.authorizer().is_none() {
            if let Some(authorizer) = single_candidate("authorizer", registry.authorizers())? {
                manager = manager.set_authorizer(authorizer);
            }
        }
        if manager.cache_manager().is_none() {
            if let Some(cache_manager) =
                single_candidate("cache manager", registry.cache_managers())?
            {
                manager = manager.set_cache_manager(cache_manager);
            }
        }
        if manager.event_bus().is_none() {
            if let Some(event_bus) = single_candidate("event bus", registry.event_buses())? {
                manager = manager.set_event_bus(event_bus);
            }
        }
        if manager.subject_store().is_none() {
            if let Some(subject_store) =
                single_candidate("subject store", registry.subject_stores())?
            {
                manager = manager.set_subject_store(subject_store);
            }
        }
        if manager.subject_factory().is_none() {
            match single_candidate("subject factory", registry.subject_factories())? {
                Some(subject_factory) => manager = manager.set_subject_factory(subject_factory),
                None => {
                    manager = manager
                        .set_subject_factory(Arc::new(DefaultSubjectFactory) as Arc<dyn SubjectFactory>)
                }
            }
        }
        if manager.session_manager().is_none() {
            if let Some(session_manager) =
                single_candidate("session manager", registry.session_managers())?
            {
                manager = manager.set_session_manager(session_manager);
            }
        }
        if manager.remember_me_manager().is_none() {
            if let Some(remember_me) =
                single_candidate("remember-me manager", registry.remember_me_managers())?
            {
                manager = manager.set_remember_me_manager(remember_me);
            }
        }

        if let Some(hook) = &self.on_configured {
            hook(&manager);
        }
        manager.publish(&SecurityEvent::ManagerConfigured);
        Ok(manager)
    }
}
