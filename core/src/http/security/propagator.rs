//! Binding propagation across asynchronous suspend/resume boundaries.
//!
//! # Shiro Equivalent
//! The async-context listener the servlet bridge installs around
//! `startAsync`: snapshot the subject at suspension, rebind on every
//! resumption path, clear on completion/timeout/error. The original keeps
//! that correct by having the listener re-register itself on each nested
//! `startAsync`; here the same protocol is an explicit state machine, so
//! termination and re-entrancy are auditable.
//!
//! # State machine (per continuation)
//!
//! ```text
//!  on_suspend          on_resume            on_terminal
//!  ───────────► Suspended ────► Resumed ────► Terminal
//!                   ▲                │
//!                   └── resuspend ◄──┘   (new continuation, old one's
//!                                         terminal events become stale)
//! ```
//!
//! Failure here is the worst failure this crate can have: either context
//! leakage (request B sees request A's identity) or context loss
//! (authenticated calls appear anonymous after suspension). Both are
//! prevented structurally, by keying every bind to the context about to
//! run and by generation-guarding every unbind.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::http::error::UnboundContextError;
use crate::http::security::context::{ContextBindings, ContextId};
use crate::http::security::manager::SecurityManager;
use crate::http::security::subject::Subject;

/// Where a continuation is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuationState {
    /// Asynchronous continuation requested; target context pre-bound.
    Suspended,
    /// A worker picked the continuation up and is running it.
    Resumed,
    /// Completion, timeout, error, or cancellation was delivered.
    Terminal,
}

/// The binding claim a continuation currently holds: which context it
/// bound, and with which generation.
#[derive(Clone)]
struct Claim {
    target: ContextId,
    generation: u64,
}

struct ContinuationInner {
    subject: Subject,
    manager: Arc<SecurityManager>,
    state: Mutex<ContinuationState>,
    claim: Mutex<Claim>,
}

/// Captured (subject, manager) state of one suspension event.
#[derive(Clone)]
pub struct Continuation {
    inner: Arc<ContinuationInner>,
}

impl Continuation {
    pub fn state(&self) -> ContinuationState {
        *self.inner.state.lock()
    }

    /// The context this continuation currently claims.
    pub fn target(&self) -> ContextId {
        self.inner.claim.lock().target.clone()
    }
}

impl fmt::Debug for Continuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Continuation")
            .field("state", &self.state())
            .field("target", &self.target())
            .finish()
    }
}

/// Carries context bindings across async dispatch boundaries.
///
/// The surrounding pipeline invokes the `on_*` hooks at exactly four
/// points: request start, suspension request, resumption, and terminal
/// events. Nothing else mutates binding state. The propagator itself
/// never raises business errors; it only keeps the binding store correct.
pub struct AsyncPropagator {
    bindings: Arc<ContextBindings>,
}

impl AsyncPropagator {
    pub fn new(bindings: Arc<ContextBindings>) -> Self {
        AsyncPropagator { bindings }
    }

    pub fn bindings(&self) -> &Arc<ContextBindings> {
        &self.bindings
    }

    /// Pipeline hook: a request began executing on `ctx`.
    pub fn on_request_start(
        &self,
        ctx: &ContextId,
        subject: Subject,
        manager: Arc<SecurityManager>,
    ) {
        self.bindings.bind(ctx.clone(), subject, manager);
    }

    /// Pipeline hook: the request running on `original` asked for
    /// asynchronous continuation on `target`.
    ///
    /// The captured pair is bound onto `target` immediately, so code that
    /// runs after suspension was requested but before the original
    /// synchronous stack unwinds already observes the right subject there.
    /// `original` stays bound; the pipeline unbinds it via
    /// [`on_request_end`](Self::on_request_end) once it runs no further
    /// synchronous code for this request.
    pub fn on_suspend(
        &self,
        original: &ContextId,
        target: ContextId,
    ) -> Result<Continuation, UnboundContextError> {
        let binding = self.bindings.binding(original).ok_or(UnboundContextError)?;
        let generation = self.bindings.bind(
            target.clone(),
            binding.subject.clone(),
            Arc::clone(&binding.manager),
        );
        Ok(Continuation {
            inner: Arc::new(ContinuationInner {
                subject: binding.subject,
                manager: binding.manager,
                state: Mutex::new(ContinuationState::Suspended),
                claim: Mutex::new(Claim { target, generation }),
            }),
        })
    }

    /// Pipeline hook: a worker is about to run the continuation on
    /// `running`, which may differ from the context captured at
    /// suspension. The binding is keyed by the context that is about to
    /// run, never by the one that suspended.
    ///
    /// A resume arriving after a terminal event is stale and ignored.
    pub fn on_resume(&self, continuation: &Continuation, running: &ContextId) {
        let mut state = continuation.inner.state.lock();
        if *state == ContinuationState::Terminal {
            return;
        }
        *state = ContinuationState::Resumed;

        let generation = self.bindings.bind(
            running.clone(),
            continuation.inner.subject.clone(),
            Arc::clone(&continuation.inner.manager),
        );
        let previous = {
            let mut claim = continuation.inner.claim.lock();
            std::mem::replace(
                &mut *claim,
                Claim {
                    target: running.clone(),
                    generation,
                },
            )
        };
        // Resuming somewhere other than the pre-bound target releases the
        // unused pre-bind; otherwise it would outlive the continuation.
        if previous.target != *running {
            self.bindings
                .unbind_if_generation(&previous.target, previous.generation);
        }
    }

    /// Pipeline hook: a resumed continuation suspended again before its
    /// first terminal event.
    ///
    /// Returns the new continuation. The old one is superseded: its later
    /// terminal events no longer match the store's generation and cannot
    /// tear the new binding down.
    pub fn resuspend(&self, continuation: &Continuation, next: ContextId) -> Continuation {
        let generation = self.bindings.bind(
            next.clone(),
            continuation.inner.subject.clone(),
            Arc::clone(&continuation.inner.manager),
        );
        Continuation {
            inner: Arc::new(ContinuationInner {
                subject: continuation.inner.subject.clone(),
                manager: Arc::clone(&continuation.inner.manager),
                state: Mutex::new(ContinuationState::Suspended),
                claim: Mutex::new(Claim {
                    target: next,
                    generation,
                }),
            }),
        }
    }

    /// Pipeline hook: completion, timeout, error, or cancellation.
    ///
    /// Idempotent against duplicate delivery, and generation-guarded so an
    /// out-of-order terminal belonging to a superseded suspension leaves a
    /// newer binding in place. The pipeline must deliver a terminal event
    /// on every exit path, including cancellation.
    pub fn on_terminal(&self, continuation: &Continuation) {
        let mut state = continuation.inner.state.lock();
        if *state == ContinuationState::Terminal {
            return;
        }
        *state = ContinuationState::Terminal;

        let claim = continuation.inner.claim.lock().clone();
        self.bindings.unbind_if_generation(&claim.target, claim.generation);
    }

    /// Pipeline hook: the request finished (or suspended with no further
    /// synchronous code) on `ctx`.
    pub fn on_request_end(&self, ctx: &ContextId) {
        self.bindings.unbind(ctx);
    }
}
