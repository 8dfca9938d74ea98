//! Security middleware for Actix Web.
//!
//! # Shiro Equivalent
//! The servlet filter the bridge registers around every request: it is
//! the pipeline owner that drives the binding hooks. Per request it
//! allocates an execution-context id, builds a subject through the
//! manager, binds it, scopes the inner service call to that context, and
//! unbinds on every exit path.

use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use actix_service::{Service, Transform};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage};
use futures_util::future::{ok, LocalBoxFuture, Ready};

use crate::http::security::context::{ContextBindings, ContextId, CurrentContext};
use crate::http::security::environment::SecurityEnvironment;
use crate::http::security::handle::SubjectHandle;
use crate::http::security::manager::{SecurityManager, SubjectContext};
use crate::http::security::propagator::AsyncPropagator;

static REQUEST_SEQ: AtomicU64 = AtomicU64::new(0);

fn next_context_id() -> ContextId {
    ContextId::of(format!("req-{}", REQUEST_SEQ.fetch_add(1, Ordering::Relaxed)))
}

/// Security middleware factory.
///
/// # Example
/// ```ignore
/// let bindings = Arc::new(ContextBindings::new());
/// App::new().wrap(SecurityTransform::new(manager, bindings))
/// ```
pub struct SecurityTransform {
    manager: Arc<SecurityManager>,
    bindings: Arc<ContextBindings>,
}

impl SecurityTransform {
    pub fn new(manager: Arc<SecurityManager>, bindings: Arc<ContextBindings>) -> Self {
        SecurityTransform { manager, bindings }
    }

    /// Builds the middleware from an assembled environment.
    pub fn from_environment(environment: &SecurityEnvironment, bindings: Arc<ContextBindings>) -> Self {
        SecurityTransform::new(Arc::clone(environment.manager()), bindings)
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityTransform
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SecurityService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(SecurityService {
            service: Rc::new(service),
            manager: Arc::clone(&self.manager),
            propagator: Arc::new(AsyncPropagator::new(Arc::clone(&self.bindings))),
        })
    }
}

/// Security middleware service.
pub struct SecurityService<S> {
    service: Rc<S>,
    manager: Arc<SecurityManager>,
    propagator: Arc<AsyncPropagator>,
}

impl<S, B> Service<ServiceRequest> for SecurityService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let manager = Arc::clone(&self.manager);
        let propagator = Arc::clone(&self.propagator);
        let ctx = next_context_id();

        // Handlers observe the subject only through the handle; the handle
        // resolves the live binding on every call.
        req.extensions_mut()
            .insert(SubjectHandle::new(Arc::clone(propagator.bindings())));

        Box::pin(async move {
            let subject = manager.create_subject(SubjectContext::new());
            propagator.on_request_start(&ctx, subject, Arc::clone(&manager));

            // Unbind on success, error, and mid-flight drop alike: a client
            // disconnect cancels this future without completing it, and a
            // worker reused for an unrelated request must find no residue.
            let _unbind = UnbindGuard {
                propagator,
                ctx: ctx.clone(),
            };

            CurrentContext::scope(ctx, service.call(req)).await
        })
    }
}

struct UnbindGuard {
    propagator: Arc<AsyncPropagator>,
    ctx: ContextId,
}

impl Drop for UnbindGuard {
    fn drop(&mut self) {
        self.propagator.on_request_end(&self.ctx);
    }
}
