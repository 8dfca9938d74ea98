//! Security module: manager assembly, context binding, and propagation.
//!
//! # Shiro Equivalent
//! The `org.apache.shiro` core (`mgt`, `subject`, `realm`, `session`)
//! plus the glue a host bridge supplies around it.
//!
//! # Module Structure
//!
//! - `subject` - Subject model and authentication tokens
//! - `realm` - Identity/permission sources (SimpleAccountRealm)
//! - `authenticator` / `authorizer` - Strategies over the realm set
//! - `manager` - SecurityManager and its collaborator slots
//! - `registry` - Optional collaborators supplied by the host
//! - `configurer` - Assembly with deterministic precedence rules
//! - `context` - Per-execution-context subject bindings
//! - `handle` - Live, re-resolving handle onto the current subject
//! - `propagator` - Binding propagation across async suspend/resume
//! - `environment` - Assembled deployment environment
//! - `middleware` - Actix Web pipeline integration
//! - `extractor` - Handler extractor for the current subject
//! - `session` / `cache` / `event` / `remember_me` - Collaborator slots

// Re-exports for convenience
pub use authenticator::{Authenticator, RealmAuthenticator};
pub use authorizer::{Authorizer, RealmAuthorizer};
pub use cache::{Cache, CacheManager, MemoryCacheManager};
pub use configurer::SecurityManagerConfigurer;
pub use context::{Binding, ContextBindings, ContextId, CurrentContext};
pub use environment::{FilterChainResolver, SecurityEnvironment};
pub use event::{EventBus, SecurityEvent};
pub use extractor::CurrentSubject;
pub use handle::SubjectHandle;
pub use manager::{
    DefaultSubjectFactory, SecurityManager, SessionSubjectStore, SubjectContext, SubjectFactory,
    SubjectStore, PRINCIPAL_SESSION_KEY,
};
pub use middleware::SecurityTransform;
pub use propagator::{AsyncPropagator, Continuation, ContinuationState};
pub use realm::{AccountInfo, Realm, SimpleAccountRealm};
pub use registry::ComponentRegistry;
pub use remember_me::{MemoryRememberMeManager, RememberMeManager};
pub use session::{MemorySessionManager, Session, SessionConfig, SessionManager};
pub use subject::{Subject, UsernamePasswordToken};

pub mod authenticator;
pub mod authorizer;
pub mod cache;
pub mod configurer;
pub mod context;
pub mod environment;
pub mod event;
pub mod extractor;
pub mod handle;
pub mod manager;
pub mod middleware;
pub mod propagator;
pub mod realm;
pub mod registry;
pub mod remember_me;
pub mod session;
pub mod subject;
