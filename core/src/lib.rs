//! # Actix Shiro
//!
//! Apache Shiro-inspired security engine integration for Actix Web: a
//! pluggable security manager assembled from optional collaborators, a
//! per-request "current subject" handle, and a propagation protocol that
//! keeps the subject binding correct across asynchronous suspend/resume
//! boundaries.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use actix_web::{App, HttpServer};
//! use actix_shiro_core::http::security::{
//!     AccountInfo, ComponentRegistry, ContextBindings, SecurityEnvironment,
//!     SecurityManager, SecurityManagerConfigurer, SecurityTransform,
//!     SimpleAccountRealm,
//! };
//!
//! let registry = ComponentRegistry::new().register_realm(Arc::new(
//!     SimpleAccountRealm::new("users")
//!         .with_account("secret", AccountInfo::new("admin").roles(&["ADMIN"])),
//! ));
//! let environment = SecurityEnvironment::build(
//!     SecurityManager::new(),
//!     &registry,
//!     &SecurityManagerConfigurer::new(),
//! )?;
//! let bindings = Arc::new(ContextBindings::new());
//!
//! App::new().wrap(SecurityTransform::from_environment(&environment, bindings));
//! ```
//!
//! ## Modules
//!
//! - [`http::security`] - Assembly, context binding, propagation, middleware
//! - [`http::error`] - Error taxonomy

pub mod http;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::http::error::{
        AuthenticationError, AuthorizationError, ConfigError, SecurityError, UnboundContextError,
    };
    pub use crate::http::security::{
        AccountInfo, AsyncPropagator, ComponentRegistry, ContextBindings, ContextId,
        CurrentContext, CurrentSubject, SecurityEnvironment, SecurityManager,
        SecurityManagerConfigurer, SecurityTransform, SimpleAccountRealm, Subject, SubjectHandle,
        UsernamePasswordToken,
    };
}
