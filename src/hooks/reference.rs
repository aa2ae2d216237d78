use std::sync::Arc;

use parking_lot::Mutex;

/// Incidental mutable storage owned by a component instance.
///
/// Writes never notify anyone. Use it for values that must survive between
/// renders without causing one: render counters, the previous value of a
/// field, handles to external resources.
pub struct InstanceRef<T> {
    current: Arc<Mutex<T>>,
}

impl<T> Clone for InstanceRef<T> {
    fn clone(&self) -> Self {
        Self {
            current: Arc::clone(&self.current),
        }
    }
}

impl<T> InstanceRef<T> {
    pub fn new(initial: T) -> Self {
        Self {
            current: Arc::new(Mutex::new(initial)),
        }
    }

    pub fn current(&self) -> T
    where
        T: Clone,
    {
        self.current.lock().clone()
    }

    /// Store a new value, returning the one it replaced.
    pub fn set_current(&self, value: T) -> T {
        std::mem::replace(&mut *self.current.lock(), value)
    }

    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.current.lock())
    }
}
