//! Deployment environment: the assembled manager plus web-tier extras.
//!
//! # Shiro Equivalent
//! `org.apache.shiro.web.env.DefaultWebEnvironment` populated by the
//! bridge's filter initialization.

use std::fmt;
use std::sync::Arc;

use crate::http::error::ConfigError;
use crate::http::security::configurer::{single_candidate, SecurityManagerConfigurer};
use crate::http::security::manager::SecurityManager;
use crate::http::security::registry::ComponentRegistry;

/// Maps a request path to a named filter chain.
///
/// The chains themselves (and their registration) belong to the host
/// pipeline; this crate only carries the resolver as a collaborator slot.
pub trait FilterChainResolver: Send + Sync {
    fn resolve(&self, path: &str) -> Option<String>;
}

/// The read-only result of one deployment's assembly.
///
/// Cheap to clone; clones share the same manager and resolver.
#[derive(Clone)]
pub struct SecurityEnvironment {
    manager: Arc<SecurityManager>,
    filter_chain_resolver: Option<Arc<dyn FilterChainResolver>>,
}

impl SecurityEnvironment {
    /// Assembles the environment: configures the base manager from the
    /// registry and resolves the optional filter-chain resolver slot.
    pub fn build(
        base: SecurityManager,
        registry: &ComponentRegistry,
        configurer: &SecurityManagerConfigurer,
    ) -> Result<Self, ConfigError> {
        let manager = Arc::new(configurer.configure_manager(base, registry)?);
        let filter_chain_resolver =
            single_candidate("filter chain resolver", registry.filter_chain_resolvers())?;
        Ok(SecurityEnvironment {
            manager,
            filter_chain_resolver,
        })
    }

    pub fn manager(&self) -> &Arc<SecurityManager> {
        &self.manager
    }

    pub fn filter_chain_resolver(&self) -> Option<&Arc<dyn FilterChainResolver>> {
        self.filter_chain_resolver.as_ref()
    }
}

impl fmt::Debug for SecurityEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityEnvironment")
            .field("manager", &self.manager)
            .field("filter_chain_resolver", &self.filter_chain_resolver.is_some())
            .finish()
    }
}
