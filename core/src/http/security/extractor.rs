//! Extractors for accessing the current subject in handlers.

use std::future::{ready, Ready};
use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::http::error::{SecurityError, UnboundContextError};
use crate::http::security::handle::SubjectHandle;

/// Extractor handing handlers the request's [`SubjectHandle`].
///
/// # Usage
/// ```ignore
/// async fn whoami(subject: CurrentSubject) -> actix_web::Result<String> {
///     Ok(subject.principal()?.unwrap_or_else(|| "anonymous".into()))
/// }
/// ```
///
/// # Errors
/// Fails with a wiring error (HTTP 500) if the security middleware is not
/// installed; there is no anonymous fallback at this level.
#[derive(Clone)]
pub struct CurrentSubject(SubjectHandle);

impl CurrentSubject {
    pub fn into_inner(self) -> SubjectHandle {
        self.0
    }
}

impl Deref for CurrentSubject {
    type Target = SubjectHandle;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for CurrentSubject {
    type Error = SecurityError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<SubjectHandle>().cloned() {
            Some(handle) => ready(Ok(CurrentSubject(handle))),
            None => ready(Err(SecurityError::Unbound(UnboundContextError))),
        }
    }
}
