//! Errors raised by the wrapped security engine through subject operations.
//!
//! # Shiro Equivalent
//! `org.apache.shiro.authc.AuthenticationException` and
//! `org.apache.shiro.authz.AuthorizationException`
//!
//! These are expected, per-request errors. The propagation engine never
//! catches or wraps them; declarative checks rely on telling them apart
//! from wiring errors.

use actix_web::{error, http::StatusCode, HttpResponse, HttpResponseBuilder};
use derive_more::{Display, Error};

/// Raised when a login attempt fails.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum AuthenticationError {
    #[display("unknown account: {_0}")]
    UnknownAccount(#[error(not(source))] String),
    #[display("incorrect credentials for account: {_0}")]
    IncorrectCredentials(#[error(not(source))] String),
    #[display("account is disabled: {_0}")]
    DisabledAccount(#[error(not(source))] String),
}

/// Raised when a permission or role check fails.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum AuthorizationError {
    #[display("subject is not authenticated")]
    Unauthenticated,
    #[display("subject lacks required role: {_0}")]
    MissingRole(#[error(not(source))] String),
    #[display("subject lacks required permission: {_0}")]
    MissingPermission(#[error(not(source))] String),
}

impl error::ResponseError for AuthenticationError {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponseBuilder::new(self.status_code()).body(self.to_string())
    }
}

impl error::ResponseError for AuthorizationError {
    fn status_code(&self) -> StatusCode {
        match *self {
            AuthorizationError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthorizationError::MissingRole(_) | AuthorizationError::MissingPermission(_) => {
                StatusCode::FORBIDDEN
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponseBuilder::new(self.status_code()).body(self.to_string())
    }
}
