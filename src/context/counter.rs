//! Counter shared through a custom accessor.

use super::scope::{ContextError, ContextKey, Scope};
use crate::hooks::StateCell;
use crate::mvi::Subscription;

/// `{ count, set_count }` handed to consumers.
#[derive(Clone, Debug)]
pub struct ValueContext {
    count: StateCell<i64>,
}

impl ValueContext {
    pub fn count(&self) -> i64 {
        self.count.get()
    }

    pub fn set_count(&self, count: i64) {
        self.count.set(count);
    }

    pub fn increment(&self) {
        self.count.update(|count| count + 1);
    }

    pub fn watch<F>(&self, on_change: F) -> Subscription
    where
        F: Fn(i64) + Send + Sync + 'static,
    {
        self.count.watch(move |count| on_change(*count))
    }
}

impl ContextKey for ValueContext {
    type Value = ValueContext;
    const NAME: &'static str = "use_value_context";
}

pub fn provide_value_context(parent: &Scope, initial: i64) -> Scope {
    parent.provide::<ValueContext>(ValueContext {
        count: StateCell::new(initial),
    })
}

pub fn use_value_context(scope: &Scope) -> Result<ValueContext, ContextError> {
    scope.get::<ValueContext>()
}
