use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::mvi::{Action, Reducer, Store, StoreState, Subscription};

/// Replace-or-update actions for a single observed value.
pub enum ValueAction<T> {
    Set(T),
    /// Functional update computed from the value at reduce time.
    Update(Box<dyn FnOnce(&T) -> T + Send>),
}

impl<T: Send + 'static> Action for ValueAction<T> {
    fn name(&self) -> &'static str {
        match self {
            ValueAction::Set(_) => "SET",
            ValueAction::Update(_) => "UPDATE",
        }
    }
}

pub struct ValueReducer<T>(PhantomData<fn() -> T>);

impl<T: StoreState> Reducer for ValueReducer<T> {
    type State = T;
    type Action = ValueAction<T>;

    fn reduce(state: T, action: ValueAction<T>) -> T {
        match action {
            ValueAction::Set(value) => value,
            ValueAction::Update(update) => update(&state),
        }
    }
}

/// Observed state: every change notifies the cell's watchers.
///
/// Setting the value the cell already holds keeps the snapshot and wakes
/// nobody.
///
/// Clones share the same cell.
pub struct StateCell<T: StoreState> {
    store: Store<ValueReducer<T>>,
}

impl<T: StoreState> Clone for StateCell<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<T: StoreState> StateCell<T> {
    pub fn new(initial: T) -> Self {
        Self {
            store: Store::new(initial),
        }
    }

    pub fn get(&self) -> T {
        T::clone(&self.store.get_state())
    }

    pub fn snapshot(&self) -> Arc<T> {
        self.store.get_state()
    }

    pub fn set(&self, value: T) {
        self.store.dispatch(ValueAction::Set(value));
    }

    /// Derive the next value from the current one, e.g. `update(|n| n + 1)`.
    ///
    /// Prefer this over `set(get() + 1)`: queued updates each see the value
    /// produced by the update before them.
    pub fn update<F>(&self, update: F)
    where
        F: FnOnce(&T) -> T + Send + 'static,
    {
        self.store.dispatch(ValueAction::Update(Box::new(update)));
    }

    /// Call `watcher` with each new value.
    #[must_use = "dropping the subscription stops the watcher"]
    pub fn watch<F>(&self, watcher: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        // The store hands back the same snapshot for a no-op.
        let last = Mutex::new(self.store.get_state());
        self.store.subscribe(move |value| {
            {
                let mut last = last.lock();
                if Arc::ptr_eq(&last, value) {
                    return;
                }
                *last = Arc::clone(value);
            }
            watcher(&**value)
        })
    }

    pub fn watcher_count(&self) -> usize {
        self.store.observer_count()
    }
}

impl<T: StoreState + std::fmt::Debug> std::fmt::Debug for StateCell<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StateCell").field(&self.snapshot()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn functional_updates_compose() {
        let score = StateCell::new(0i64);
        score.update(|n| n + 1);
        score.update(|n| n + 1);
        score.update(|n| n - 1);
        assert_eq!(score.get(), 1);
    }

    #[test]
    fn watcher_sees_each_change() {
        let cell = StateCell::new(String::from("cats"));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = cell.watch(move |value: &String| sink.lock().push(value.clone()));

        cell.set("dogs".to_string());
        assert_eq!(*seen.lock(), vec!["dogs".to_string()]);
    }

    #[test]
    fn setting_equal_value_keeps_snapshot() {
        let cell = StateCell::new(5u32);
        let before = cell.snapshot();
        cell.set(5);
        assert!(Arc::ptr_eq(&before, &cell.snapshot()));
    }

    #[test]
    fn setting_equal_value_wakes_no_watcher() {
        let cell = StateCell::new(String::from("cats"));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = cell.watch(move |value: &String| sink.lock().push(value.clone()));

        cell.set("cats".to_string());
        cell.set("dogs".to_string());
        cell.set("dogs".to_string());
        cell.update(|animal| animal.clone());
        assert_eq!(*seen.lock(), vec!["dogs".to_string()]);
    }
}
