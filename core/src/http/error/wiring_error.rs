//! Assembly and wiring errors.
//!
//! Unlike [`AuthenticationError`] and [`AuthorizationError`], which are
//! expected per-request outcomes, these signal defects in how the engine
//! was assembled or invoked. They are fatal and never retried.

use actix_web::{error, http::StatusCode, HttpResponse, HttpResponseBuilder};
use derive_more::{Display, Error, From};

use crate::http::error::{AuthenticationError, AuthorizationError};

/// Fatal configuration error, surfaced at assembly time.
///
/// Aborts startup; there is no recovery path.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ConfigError {
    /// More than one candidate was registered for a singular slot.
    ///
    /// Picking one by iteration order would make deployments
    /// order-dependent, so this is rejected outright.
    #[display("{count} candidates registered for singular slot: {slot}")]
    AmbiguousComponent { slot: &'static str, count: usize },
}

/// A capability was invoked through a handle while no subject was bound
/// to the calling execution context.
///
/// Always a wiring defect: some pipeline hook was skipped or the call
/// happened outside any request scope. Never silently defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("no subject is bound to the calling execution context")]
pub struct UnboundContextError;

/// Combined error type returned by [`SubjectHandle`] operations.
///
/// Engine errors keep their original identity as distinct variants so a
/// permission-denied outcome stays distinguishable from a wiring error.
///
/// [`SubjectHandle`]: crate::http::security::SubjectHandle
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum SecurityError {
    #[display("{_0}")]
    Unbound(UnboundContextError),
    #[display("{_0}")]
    Authentication(AuthenticationError),
    #[display("{_0}")]
    Authorization(AuthorizationError),
}

impl error::ResponseError for UnboundContextError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponseBuilder::new(self.status_code()).body(self.to_string())
    }
}

impl error::ResponseError for SecurityError {
    fn status_code(&self) -> StatusCode {
        match self {
            SecurityError::Unbound(e) => e.status_code(),
            SecurityError::Authentication(e) => e.status_code(),
            SecurityError::Authorization(e) => e.status_code(),
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponseBuilder::new(self.status_code()).body(self.to_string())
    }
}
