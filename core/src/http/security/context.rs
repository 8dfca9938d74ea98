//! Per-execution-context binding of the current subject.
//!
//! # Shiro Equivalent
//! `org.apache.shiro.util.ThreadContext` / `SubjectThreadState`
//!
//! # Overview
//! Two pieces cooperate here:
//!
//! - [`ContextBindings`] is an explicit keyed store mapping an execution
//!   context (a worker serving one logical request) to its bound subject
//!   and manager. Keeping the association explicit, instead of hiding it
//!   in static mutable state, is what makes isolation testable.
//! - [`CurrentContext`] is the ambient side: a task-local naming which
//!   [`ContextId`] the running task serves, set by the pipeline when it
//!   enters request code. [`SubjectHandle`] resolves through it on every
//!   call.
//!
//! # Thread Safety
//! The store is keyed per execution context with no cross-key contention;
//! concurrent requests never serialize on a shared lock and never observe
//! each other's subject.
//!
//! [`SubjectHandle`]: crate::http::security::SubjectHandle

use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use crate::http::security::manager::SecurityManager;
use crate::http::security::subject::Subject;

/// Identity of an execution context: a worker thread or scheduled task
/// currently running request-handling code.
///
/// Cheap to clone; equality is by value, so a continuation resumed on a
/// different worker can still present the same logical context id.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ContextId(Arc<str>);

impl ContextId {
    pub fn of(id: impl AsRef<str>) -> Self {
        ContextId(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContextId({})", self.0)
    }
}

/// One entry in the binding store: the (subject, manager) pair bound to an
/// execution context, plus the generation of the `bind` call that created
/// it. Generations let the propagator detect stale terminal events.
#[derive(Clone)]
pub struct Binding {
    pub subject: Subject,
    pub manager: Arc<SecurityManager>,
    pub generation: u64,
}

/// Keyed store of context → (subject, manager) bindings.
#[derive(Default)]
pub struct ContextBindings {
    entries: DashMap<ContextId, Binding>,
    generations: AtomicU64,
}

impl ContextBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `subject` and `manager` to `ctx`, overwriting any prior entry
    /// (last-bind-wins). Returns the generation of this bind.
    pub fn bind(&self, ctx: ContextId, subject: Subject, manager: Arc<SecurityManager>) -> u64 {
        let generation = self.generations.fetch_add(1, Ordering::Relaxed) + 1;
        self.entries.insert(
            ctx,
            Binding {
                subject,
                manager,
                generation,
            },
        );
        generation
    }

    /// Returns the subject bound to `ctx`, or `None` if the context has no
    /// binding. Absence is a representable state here; escalating it to an
    /// error is the caller's policy.
    pub fn current(&self, ctx: &ContextId) -> Option<Subject> {
        self.entries.get(ctx).map(|b| b.subject.clone())
    }

    /// Returns the full binding for `ctx`.
    pub fn binding(&self, ctx: &ContextId) -> Option<Binding> {
        self.entries.get(ctx).map(|b| b.clone())
    }

    /// Removes the binding for `ctx`. No-op if absent.
    pub fn unbind(&self, ctx: &ContextId) {
        self.entries.remove(ctx);
    }

    /// Removes the binding for `ctx` only if it still carries `generation`.
    /// Returns whether an entry was removed. A mismatch means the binding
    /// was superseded by a later bind and must be left alone.
    pub fn unbind_if_generation(&self, ctx: &ContextId, generation: u64) -> bool {
        self.entries
            .remove_if(ctx, |_, binding| binding.generation == generation)
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

tokio::task_local! {
    static CURRENT_CONTEXT: RefCell<Option<ContextId>>;
    static ASSOCIATED_SUBJECT: Subject;
}

/// Ambient accessor for the execution context the running task serves.
///
/// The pipeline establishes it with [`CurrentContext::scope`] around
/// request-handling code; everything below resolves the id without having
/// it threaded through call signatures.
pub struct CurrentContext;

impl CurrentContext {
    /// Returns the current context id, or `None` outside any scope.
    pub fn id() -> Option<ContextId> {
        CURRENT_CONTEXT
            .try_with(|ctx| ctx.borrow().clone())
            .ok()
            .flatten()
    }

    /// Runs a future with the given context id as the ambient current
    /// context.
    pub async fn scope<F>(id: ContextId, f: F) -> F::Output
    where
        F: Future,
    {
        CURRENT_CONTEXT.scope(RefCell::new(Some(id)), f).await
    }

}

/// Runs a future with `subject` associated directly, independent of the
/// binding store. Backs [`Subject::associate_with`].
pub(crate) async fn associate<F>(subject: Subject, f: F) -> F::Output
where
    F: Future,
{
    ASSOCIATED_SUBJECT.scope(subject, f).await
}

/// The subject associated with the running task via [`associate`], if any.
pub(crate) fn associated_subject() -> Option<Subject> {
    ASSOCIATED_SUBJECT.try_with(|subject| subject.clone()).ok()
}
