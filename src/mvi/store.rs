//! Observable store driven by a [`Reducer`].
//!
//! The store owns the single state cell. Only the dispatch cycle replaces it:
//! reduce, swap the snapshot, then notify observers. A dispatch issued from an
//! observer on the thread running the cycle is queued and processed once the
//! current action's notifications complete, in submission order. A dispatch
//! from any other thread waits for the running cycle to finish, so on return
//! its action has been applied and observed.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::{Mutex, ReentrantMutex, RwLock};

use super::action::Action;
use super::reducer::Reducer;

type Observer<S> = Arc<dyn Fn(&Arc<S>) + Send + Sync>;

/// Shared handle to a reducer-driven state cell.
///
/// Cloning the handle shares the same state; it does not fork it.
pub struct Store<R: Reducer> {
    inner: Arc<StoreInner<R>>,
}

struct StoreInner<R: Reducer> {
    state: RwLock<Arc<R::State>>,
    /// Held by the thread running a dispatch cycle.
    cycle: ReentrantMutex<()>,
    observers: Mutex<Observers<R::State>>,
    pending: Mutex<Pending<R::Action>>,
}

struct Observers<S> {
    next_id: u64,
    entries: Vec<(u64, Observer<S>)>,
}

struct Pending<A> {
    queue: VecDeque<A>,
    draining: bool,
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Reducer> Store<R> {
    /// Create a store holding `initial`.
    pub fn new(initial: R::State) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(Arc::new(initial)),
                cycle: ReentrantMutex::new(()),
                observers: Mutex::new(Observers {
                    next_id: 0,
                    entries: Vec::new(),
                }),
                pending: Mutex::new(Pending {
                    queue: VecDeque::new(),
                    draining: false,
                }),
            }),
        }
    }

    /// Current state snapshot.
    ///
    /// The snapshot stays valid (and unchanged) after later dispatches; it is
    /// simply no longer current.
    pub fn get_state(&self) -> Arc<R::State> {
        Arc::clone(&self.inner.state.read())
    }

    /// Reduce `action` into the state and notify every observer.
    ///
    /// Observers run after the new state is in place, exactly once per
    /// processed action, including actions that leave the state unchanged.
    /// Called from an observer, the action is queued behind the current one
    /// and applied before the outermost `dispatch` returns.
    pub fn dispatch(&self, action: R::Action) {
        let _cycle = self.inner.cycle.lock();
        {
            let mut pending = self.inner.pending.lock();
            pending.queue.push_back(action);
            // Only the cycle-holding thread can observe `draining` here.
            if pending.draining {
                tracing::trace!(
                    queued = pending.queue.len(),
                    "Dispatch queued behind running cycle"
                );
                return;
            }
            pending.draining = true;
        }

        // A panicking reducer or observer must not leave the store wedged,
        // nor leave its queued follow-ups to leak into a later dispatch.
        let inner = Arc::clone(&self.inner);
        let guard = scopeguard::guard_on_unwind((), move |()| {
            let mut pending = inner.pending.lock();
            pending.draining = false;
            let dropped = pending.queue.len();
            pending.queue.clear();
            if dropped > 0 {
                tracing::warn!(dropped, "Discarded queued actions after a panic");
            }
        });

        loop {
            let action = {
                let mut pending = self.inner.pending.lock();
                match pending.queue.pop_front() {
                    Some(action) => action,
                    None => {
                        pending.draining = false;
                        break;
                    }
                }
            };
            self.process(action);
        }

        drop(guard);
    }

    /// Dispatch each action in order.
    pub fn dispatch_all<I>(&self, actions: I)
    where
        I: IntoIterator<Item = R::Action>,
    {
        for action in actions {
            self.dispatch(action);
        }
    }

    /// Register `observer` to run after every completed dispatch.
    ///
    /// The observer is released when the returned [`Subscription`] is
    /// dropped or explicitly unsubscribed.
    #[must_use = "dropping the subscription unsubscribes the observer"]
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&Arc<R::State>) + Send + Sync + 'static,
    {
        let id = {
            let mut observers = self.inner.observers.lock();
            let id = observers.next_id;
            observers.next_id += 1;
            observers.entries.push((id, Arc::new(observer)));
            id
        };

        let weak = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.observers.lock().entries.retain(|(entry, _)| *entry != id);
            }
        })
    }

    /// Number of currently registered observers.
    pub fn observer_count(&self) -> usize {
        self.inner.observers.lock().entries.len()
    }

    fn process(&self, action: R::Action) {
        let name = action.name();
        let current = self.get_state();
        let next = R::reduce(R::State::clone(&current), action);

        let snapshot = if next == *current {
            tracing::debug!(action = name, "Transition left state unchanged");
            current
        } else {
            let next = Arc::new(next);
            *self.inner.state.write() = Arc::clone(&next);
            next
        };
        tracing::trace!(action = name, "Action reduced");

        // Snapshot the list so observers may (un)subscribe while being notified.
        let observers: Vec<Observer<R::State>> = self
            .inner
            .observers
            .lock()
            .entries
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            observer(&snapshot);
        }
    }
}

/// Capability to deregister an observer.
///
/// Releases on drop; [`Subscription::unsubscribe`] makes the release explicit.
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub(crate) fn new<F>(release: F) -> Self
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Stop delivering notifications to this observer.
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mvi::StoreState;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Tally {
        value: i64,
        log: Vec<i64>,
    }

    impl StoreState for Tally {}

    enum TallyAction {
        Add(i64),
        Noop,
    }

    impl Action for TallyAction {
        fn name(&self) -> &'static str {
            match self {
                TallyAction::Add(_) => "ADD",
                TallyAction::Noop => "NOOP",
            }
        }
    }

    struct TallyReducer;

    impl Reducer for TallyReducer {
        type State = Tally;
        type Action = TallyAction;

        fn reduce(mut state: Tally, action: TallyAction) -> Tally {
            match action {
                TallyAction::Add(n) => {
                    state.value += n;
                    state.log.push(n);
                    state
                }
                TallyAction::Noop => state,
            }
        }
    }

    #[test]
    fn dispatch_replaces_state() {
        let store = Store::<TallyReducer>::new(Tally::default());
        store.dispatch(TallyAction::Add(2));
        store.dispatch(TallyAction::Add(3));
        assert_eq!(store.get_state().value, 5);
        assert_eq!(store.get_state().log, vec![2, 3]);
    }

    #[test]
    fn noop_keeps_same_snapshot() {
        let store = Store::<TallyReducer>::new(Tally::default());
        let before = store.get_state();
        store.dispatch(TallyAction::Noop);
        assert!(Arc::ptr_eq(&before, &store.get_state()));
    }

    #[test]
    fn old_snapshot_is_not_mutated() {
        let store = Store::<TallyReducer>::new(Tally::default());
        let before = store.get_state();
        store.dispatch(TallyAction::Add(7));
        assert_eq!(before.value, 0);
        assert_eq!(store.get_state().value, 7);
    }

    #[test]
    fn observer_sees_new_state() {
        let store = Store::<TallyReducer>::new(Tally::default());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let reader = store.clone();
        let sink = Arc::clone(&seen);
        let _sub = store.subscribe(move |state| {
            // The store already holds the notified snapshot.
            assert!(Arc::ptr_eq(state, &reader.get_state()));
            sink.lock().push(state.value);
        });

        store.dispatch(TallyAction::Add(1));
        store.dispatch(TallyAction::Noop);
        assert_eq!(*seen.lock(), vec![1, 1]);
    }

    #[test]
    fn dropping_subscription_releases_observer() {
        let store = Store::<TallyReducer>::new(Tally::default());
        let sub = store.subscribe(|_| {});
        assert_eq!(store.observer_count(), 1);
        drop(sub);
        assert_eq!(store.observer_count(), 0);
    }

    #[test]
    fn reentrant_dispatch_is_queued_in_order() {
        let store = Store::<TallyReducer>::new(Tally::default());
        let feeder = store.clone();
        let _sub = store.subscribe(move |state| {
            if state.log.last() == Some(&1) {
                feeder.dispatch(TallyAction::Add(10));
            }
        });

        store.dispatch(TallyAction::Add(1));
        assert_eq!(store.get_state().log, vec![1, 10]);
    }

    #[test]
    fn panicking_observer_does_not_wedge_store() {
        let store = Store::<TallyReducer>::new(Tally::default());
        let feeder = store.clone();
        let sub = store.subscribe(move |state| {
            if state.value == 1 {
                feeder.dispatch(TallyAction::Add(5));
                panic!("observer failure");
            }
        });

        let panicking = store.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            panicking.dispatch(TallyAction::Add(1));
        }));
        assert!(result.is_err());
        assert_eq!(store.get_state().value, 1);

        // The follow-up queued before the panic is discarded.
        sub.unsubscribe();
        store.dispatch(TallyAction::Add(100));
        assert_eq!(store.get_state().value, 101);
        assert_eq!(store.get_state().log, vec![1, 100]);
    }
}
