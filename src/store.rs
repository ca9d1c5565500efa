//! Constructible state container: `get_state` / `dispatch` / `subscribe`.
//!
//! Many readers, one writer role. Every dispatch reduces the current snapshot
//! into a new one and swaps it in atomically, so readers only ever observe
//! whole snapshots.

use std::cell::Cell;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, ReentrantMutex, RwLock};

use crate::mvi::{Action, Dispatch, Reducer};

/// Callback invoked with each new snapshot.
pub type Listener<S> = Arc<dyn Fn(&Arc<S>) + Send + Sync>;

/// Shared handle to a state container driven by reducer `R`.
///
/// Cloning is cheap; clones share the same state and subscribers.
pub struct Store<R: Reducer> {
    inner: Arc<StoreInner<R>>,
}

struct StoreInner<R: Reducer> {
    state: RwLock<Arc<R::State>>,
    /// Serializes dispatches. Reentrant so listeners may dispatch; the flag
    /// is set while the holding thread drains `queue`.
    dispatch_lock: ReentrantMutex<Cell<bool>>,
    queue: Mutex<VecDeque<R::Action>>,
    listeners: Mutex<Vec<(u64, Listener<R::State>)>>,
    next_listener_id: AtomicU64,
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Reducer> Default for Store<R> {
    fn default() -> Self {
        Self::new(R::State::default())
    }
}

impl<R: Reducer> Store<R> {
    pub fn new(initial: R::State) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(Arc::new(initial)),
                dispatch_lock: ReentrantMutex::new(Cell::new(false)),
                queue: Mutex::new(VecDeque::new()),
                listeners: Mutex::new(Vec::new()),
                next_listener_id: AtomicU64::new(0),
            }),
        }
    }

    /// Current snapshot. Never blocks on a running reducer for long: the
    /// write lock is only held for the pointer swap.
    pub fn get_state(&self) -> Arc<R::State> {
        Arc::clone(&self.inner.state.read())
    }

    /// Apply `action` and notify subscribers if the snapshot changed.
    ///
    /// Actions dispatched from inside a listener are queued and applied once
    /// every listener has seen the current snapshot, so each listener sees
    /// snapshots in the order they were produced.
    pub fn dispatch(&self, action: R::Action) {
        self.inner.queue.lock().push_back(action);

        let guard = self.inner.dispatch_lock.lock();
        if guard.replace(true) {
            // A listener on this thread dispatched; the outer loop drains it.
            return;
        }
        let _draining = DrainFlag(&guard);

        loop {
            let next_action = self.inner.queue.lock().pop_front();
            match next_action {
                Some(action) => self.apply(action),
                None => break,
            }
        }
    }

    fn apply(&self, action: R::Action) {
        let current = self.get_state();
        let next = R::reduce((*current).clone(), &action);
        if next == *current {
            tracing::trace!(action = action.type_name(), "Dispatch left state unchanged");
            return;
        }

        let next = Arc::new(next);
        *self.inner.state.write() = Arc::clone(&next);
        tracing::debug!(action = action.type_name(), "State updated");

        let listeners: Vec<Listener<R::State>> = self
            .inner
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&next);
        }
    }

    /// Register `listener`; it stays registered until the returned
    /// [`Subscription`] is dropped or unsubscribed.
    pub fn subscribe<F>(&self, listener: F) -> Subscription<R>
    where
        F: Fn(&Arc<R::State>) + Send + Sync + 'static,
    {
        let id = self.inner.next_listener_id.fetch_add(1, Ordering::Relaxed);
        let listener: Listener<R::State> = Arc::new(listener);
        self.inner.listeners.lock().push((id, listener));
        Subscription {
            id,
            store: Arc::downgrade(&self.inner),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }
}

impl<R> Dispatch<R::Action> for Store<R>
where
    R: Reducer,
    R::Action: Action,
{
    fn dispatch(&self, action: R::Action) {
        Store::<R>::dispatch(self, action);
    }
}

/// Clears the draining flag even if a listener panics.
struct DrainFlag<'a>(&'a Cell<bool>);

impl Drop for DrainFlag<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Keeps a listener registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes its listener"]
pub struct Subscription<R: Reducer> {
    id: u64,
    store: Weak<StoreInner<R>>,
}

impl<R: Reducer> Subscription<R> {
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl<R: Reducer> Drop for Subscription<R> {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner.listeners.lock().retain(|(id, _)| *id != self.id);
        }
    }
}
