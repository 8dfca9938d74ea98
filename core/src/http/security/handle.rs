//! Live handle onto "the current subject".
//!
//! # Shiro Equivalent
//! The `Subject` proxy produced for injection points: a
//! `java.lang.reflect.Proxy` forwarding every call to
//! `ThreadContext.getSubject()`. Here the same indirection is a concrete
//! forwarding type; no reflection is involved.
//!
//! A handle is created once per injection/lookup site and shared freely.
//! It caches nothing: every operation re-resolves the subject bound to the
//! *calling* execution context, so a login that swaps the bound subject's
//! state is immediately visible to all holders, and the handle can never
//! go stale.

use std::sync::Arc;

use crate::http::error::{SecurityError, UnboundContextError};
use crate::http::security::context::{self, ContextBindings, ContextId, CurrentContext};
use crate::http::security::session::Session;
use crate::http::security::subject::{Subject, UsernamePasswordToken};

#[derive(Clone)]
pub struct SubjectHandle {
    bindings: Arc<ContextBindings>,
}

impl SubjectHandle {
    pub fn new(bindings: Arc<ContextBindings>) -> Self {
        SubjectHandle { bindings }
    }

    /// Resolves the live subject for the calling execution context.
    ///
    /// Resolution order: the binding for the ambient [`CurrentContext`]
    /// id, then a subject carried by
    /// [`Subject::associate_with`] into detached work. Anything else is a
    /// wiring defect.
    pub fn subject(&self) -> Result<Subject, UnboundContextError> {
        if let Some(id) = CurrentContext::id() {
            if let Some(subject) = self.bindings.current(&id) {
                return Ok(subject);
            }
        }
        context::associated_subject().ok_or(UnboundContextError)
    }

    /// Resolves the subject bound to an explicit execution context,
    /// bypassing the ambient id. Used by pipeline code that tracks context
    /// identities itself.
    pub fn subject_for(&self, ctx: &ContextId) -> Result<Subject, UnboundContextError> {
        self.bindings.current(ctx).ok_or(UnboundContextError)
    }

    pub fn principal(&self) -> Result<Option<String>, SecurityError> {
        Ok(self.subject()?.principal())
    }

    pub fn is_authenticated(&self) -> Result<bool, SecurityError> {
        Ok(self.subject()?.is_authenticated())
    }

    pub fn is_remembered(&self) -> Result<bool, SecurityError> {
        Ok(self.subject()?.is_remembered())
    }

    pub fn has_role(&self, role: &str) -> Result<bool, SecurityError> {
        Ok(self.subject()?.has_role(role))
    }

    pub fn is_permitted(&self, permission: &str) -> Result<bool, SecurityError> {
        Ok(self.subject()?.is_permitted(permission))
    }

    /// Role check; an engine denial propagates with its identity intact.
    pub fn check_role(&self, role: &str) -> Result<(), SecurityError> {
        self.subject()?.check_role(role)?;
        Ok(())
    }

    /// Permission check; an engine denial propagates with its identity
    /// intact.
    pub fn check_permission(&self, permission: &str) -> Result<(), SecurityError> {
        self.subject()?.check_permission(permission)?;
        Ok(())
    }

    pub fn login(&self, token: &UsernamePasswordToken) -> Result<(), SecurityError> {
        self.subject()?.login(token)?;
        Ok(())
    }

    pub fn logout(&self) -> Result<(), SecurityError> {
        self.subject()?.logout();
        Ok(())
    }

    pub fn session(&self) -> Result<Option<Arc<Session>>, SecurityError> {
        Ok(self.subject()?.session())
    }

    pub fn session_or_create(&self) -> Result<Option<Arc<Session>>, SecurityError> {
        Ok(self.subject()?.session_or_create())
    }
}
