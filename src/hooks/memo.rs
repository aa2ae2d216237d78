//! Cache-by-key memoization.
//!
//! [`Memo`] keys its cache on **value equality** of the dependencies
//! (`PartialEq`). Dependencies that must compare by **reference identity**
//! are wrapped in [`ByRef`], whose equality is `Arc::ptr_eq`: two distinct
//! allocations holding equal values count as a change.

use std::ops::Deref;
use std::sync::Arc;

/// Last `(deps, value)` pair plus a count of computations.
pub struct Memo<D, V> {
    cached: Option<(D, V)>,
    computations: usize,
}

impl<D, V> Default for Memo<D, V> {
    fn default() -> Self {
        Self {
            cached: None,
            computations: 0,
        }
    }
}

impl<D: PartialEq, V> Memo<D, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value, recomputing only if `deps` changed.
    pub fn get(&mut self, deps: D, compute: impl FnOnce(&D) -> V) -> &V {
        let entry = match self.cached.take() {
            Some((cached, value)) if cached == deps => (cached, value),
            _ => {
                self.computations += 1;
                let value = compute(&deps);
                (deps, value)
            }
        };
        &self.cached.insert(entry).1
    }

    /// How many times `compute` has run.
    pub fn computations(&self) -> usize {
        self.computations
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

/// Dependency compared by pointer identity instead of value.
pub struct ByRef<T: ?Sized>(pub Arc<T>);

impl<T> ByRef<T> {
    pub fn new(value: T) -> Self {
        Self(Arc::new(value))
    }
}

impl<T: ?Sized> Clone for ByRef<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: ?Sized> PartialEq for ByRef<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> Deref for ByRef<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

pub type MemoCallback<R> = Arc<dyn Fn() -> R + Send + Sync>;

/// Memoized callback whose identity is stable while its deps are equal.
///
/// Consumers that compare callbacks with `Arc::ptr_eq` (e.g. an effect keyed
/// on the callback) only rerun when the deps actually changed.
pub struct CallbackMemo<D, R> {
    memo: Memo<D, MemoCallback<R>>,
}

impl<D, R> Default for CallbackMemo<D, R> {
    fn default() -> Self {
        Self {
            memo: Memo::default(),
        }
    }
}

impl<D: PartialEq, R: 'static> CallbackMemo<D, R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<F>(&mut self, deps: D, make: impl FnOnce(&D) -> F) -> MemoCallback<R>
    where
        F: Fn() -> R + Send + Sync + 'static,
    {
        let callback = self.memo.get(deps, |deps| -> MemoCallback<R> { Arc::new(make(deps)) });
        Arc::clone(callback)
    }

    pub fn creations(&self) -> usize {
        self.memo.computations()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recomputes_only_on_change() {
        let mut memo = Memo::new();
        assert_eq!(*memo.get(2, |n| n * 2), 4);
        assert_eq!(*memo.get(2, |_| unreachable!()), 4);
        assert_eq!(*memo.get(3, |n| n * 2), 6);
        assert_eq!(memo.computations(), 2);
    }

    #[test]
    fn invalidate_forces_recompute() {
        let mut memo = Memo::new();
        memo.get("a", |s| s.len());
        memo.invalidate();
        memo.get("a", |s| s.len());
        assert_eq!(memo.computations(), 2);
    }

    #[test]
    fn by_ref_treats_equal_values_as_different() {
        let mut memo = Memo::new();
        let first = ByRef::new(vec![1, 2]);
        memo.get(first.clone(), |v| v.len());
        memo.get(first.clone(), |v| v.len());
        assert_eq!(memo.computations(), 1);

        memo.get(ByRef::new(vec![1, 2]), |v| v.len());
        assert_eq!(memo.computations(), 2);
    }

    #[test]
    fn callback_identity_tracks_deps() {
        let mut callbacks = CallbackMemo::new();
        let a = callbacks.get(1i64, |&n| move || vec![n, n + 1, n + 2]);
        let b = callbacks.get(1i64, |&n| move || vec![n, n + 1, n + 2]);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a(), vec![1, 2, 3]);

        let c = callbacks.get(5i64, |&n| move || vec![n, n + 1, n + 2]);
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(c(), vec![5, 6, 7]);
        assert_eq!(callbacks.creations(), 2);
    }
}
