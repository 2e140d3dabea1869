//! Cooperative cancellation for in-flight requests.
//!
//! A [`Canceller`] is owned by the caller. Each request binds a fresh token to
//! it when the request is built; binding a second request replaces the first
//! binding. Finishing a request releases its binding, so a late `cancel()`
//! is a no-op.

use std::future::IntoFuture;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::BoxFuture;
use tokio::sync::Notify;

use docatom_core::DocAtomResult;

/// Abort flag shared between a [`Canceller`] and the request it is bound to.
#[derive(Clone, Default)]
pub(crate) struct AbortToken {
    inner: Arc<AbortState>,
}

#[derive(Default)]
struct AbortState {
    aborted: AtomicBool,
    notify: Notify,
}

impl AbortToken {
    fn cancel(&self) {
        self.inner.aborted.store(true, Ordering::SeqCst);
        // Only the bound request ever waits, so one stored permit is enough.
        self.inner.notify.notify_one();
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.inner.aborted.load(Ordering::SeqCst)
    }

    /// Resolves once the token has been cancelled.
    pub(crate) async fn cancelled(&self) {
        if self.is_cancelled() {
            return;
        }
        self.inner.notify.notified().await;
    }
}

/// Caller-side handle used to abort one in-flight request.
#[derive(Clone, Default)]
pub struct Canceller {
    inner: Arc<CancellerInner>,
}

#[derive(Default)]
struct CancellerInner {
    bound: Mutex<Option<(u64, AbortToken)>>,
    next_id: AtomicU64,
    fired: AtomicBool,
}

impl Canceller {
    /// Create a canceller with nothing bound to it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort the request currently bound to this canceller.
    ///
    /// Returns `true` if a request was aborted, `false` if nothing was bound
    /// (never bound, already finished, or already cancelled).
    pub fn cancel(&self) -> bool {
        let Some((_, token)) = self.lock().take() else {
            return false;
        };
        token.cancel();
        self.inner.fired.store(true, Ordering::SeqCst);
        true
    }

    /// Whether `cancel()` has ever aborted a request.
    pub fn is_cancelled(&self) -> bool {
        self.inner.fired.load(Ordering::SeqCst)
    }

    /// Whether a request is currently bound.
    pub fn is_bound(&self) -> bool {
        self.lock().is_some()
    }

    pub(crate) fn bind(&self) -> Binding {
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
        let token = AbortToken::default();
        *self.lock() = Some((id, token.clone()));
        Binding {
            id,
            token,
            owner: self.clone(),
        }
    }

    fn release(&self, id: u64) {
        let mut bound = self.lock();
        if matches!(*bound, Some((current, _)) if current == id) {
            *bound = None;
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<(u64, AbortToken)>> {
        // The guarded value stays consistent even if a holder panicked.
        self.inner
            .bound
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for Canceller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canceller")
            .field("bound", &self.is_bound())
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// One request's attachment to a [`Canceller`]. Released on drop.
pub(crate) struct Binding {
    id: u64,
    token: AbortToken,
    owner: Canceller,
}

impl Binding {
    pub(crate) fn token(&self) -> &AbortToken {
        &self.token
    }
}

impl Drop for Binding {
    fn drop(&mut self) {
        self.owner.release(self.id);
    }
}

type Start<'a, T> = Box<dyn FnOnce(Binding) -> BoxFuture<'a, DocAtomResult<T>> + Send + 'a>;

/// A request that passed its precondition checks and has not been awaited yet.
///
/// Await it (it implements [`IntoFuture`]) to send the request. Grab
/// [`canceller`](Self::canceller) first to be able to abort it.
#[must_use = "requests do nothing unless awaited"]
pub struct Pending<'a, T> {
    binding: Binding,
    start: Start<'a, T>,
}

impl<'a, T> Pending<'a, T> {
    pub(crate) fn new<F>(start: F) -> Self
    where
        F: FnOnce(Binding) -> BoxFuture<'a, DocAtomResult<T>> + Send + 'a,
    {
        Self {
            binding: Canceller::new().bind(),
            start: Box::new(start),
        }
    }

    /// The canceller bound to this request.
    pub fn canceller(&self) -> Canceller {
        self.binding.owner.clone()
    }

    /// Bind this request to a caller-supplied canceller instead.
    pub fn with_canceller(mut self, canceller: &Canceller) -> Self {
        self.binding = canceller.bind();
        self
    }
}

impl<'a, T: 'a> IntoFuture for Pending<'a, T> {
    type Output = DocAtomResult<T>;
    type IntoFuture = BoxFuture<'a, DocAtomResult<T>>;

    fn into_future(self) -> Self::IntoFuture {
        (self.start)(self.binding)
    }
}

impl<T> std::fmt::Debug for Pending<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pending")
            .field("canceller", &self.binding.owner)
            .finish_non_exhaustive()
    }
}
