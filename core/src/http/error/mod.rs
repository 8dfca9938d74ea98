//! Error types for the security engine.

pub use auth_error::{AuthenticationError, AuthorizationError};
pub use wiring_error::{ConfigError, SecurityError, UnboundContextError};

mod auth_error;
mod wiring_error;
