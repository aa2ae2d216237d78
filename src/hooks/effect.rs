//! Effects with cleanup.
//!
//! An [`EffectSlot`] is the scoped acquisition of some resource (an event
//! subscription, a timer, a pending request). Setup returns a [`Cleanup`];
//! the cleanup runs before the next setup when the dependencies change, and
//! when the slot itself is dropped.

use crate::mvi::Subscription;

/// Teardown for an effect. Runs at most once.
#[must_use = "dropping a Cleanup without running it leaks the resource it guards"]
pub struct Cleanup(Option<Box<dyn FnOnce() + Send>>);

impl Cleanup {
    pub fn new<F>(teardown: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self(Some(Box::new(teardown)))
    }

    /// Effect with nothing to release.
    pub fn none() -> Self {
        Self(None)
    }

    pub fn run(mut self) {
        if let Some(teardown) = self.0.take() {
            teardown();
        }
    }
}

impl From<Subscription> for Cleanup {
    fn from(subscription: Subscription) -> Self {
        Cleanup::new(move || subscription.unsubscribe())
    }
}

/// One effect site with its last dependencies and outstanding cleanup.
pub struct EffectSlot<D> {
    deps: Option<D>,
    cleanup: Option<Cleanup>,
    runs: usize,
    every_call: bool,
}

impl<D> Default for EffectSlot<D> {
    fn default() -> Self {
        Self {
            deps: None,
            cleanup: None,
            runs: 0,
            every_call: false,
        }
    }
}

impl EffectSlot<()> {
    /// Slot that reruns on every call, like an effect without dependencies.
    pub fn every() -> Self {
        let mut slot = Self::default();
        slot.every_call = true;
        slot
    }
}

impl<D: PartialEq> EffectSlot<D> {
    /// Slot that reruns when its dependencies change.
    ///
    /// With `D = ()` it runs once, on the first call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `setup` if this is the first call or `deps` changed.
    ///
    /// The previous cleanup runs before the new setup. Returns whether
    /// setup ran.
    pub fn run<F>(&mut self, deps: D, setup: F) -> bool
    where
        F: FnOnce(&D) -> Cleanup,
    {
        let changed = self.every_call || self.deps.as_ref() != Some(&deps);
        if !changed {
            return false;
        }

        if let Some(cleanup) = self.cleanup.take() {
            cleanup.run();
        }
        self.cleanup = Some(setup(&deps));
        self.deps = Some(deps);
        self.runs += 1;
        true
    }

    /// Number of times setup has run.
    pub fn runs(&self) -> usize {
        self.runs
    }
}

impl<D> EffectSlot<D> {
    /// Run the outstanding cleanup now. The next `run` sets up again.
    pub fn teardown(&mut self) {
        self.deps = None;
        if let Some(cleanup) = self.cleanup.take() {
            cleanup.run();
        }
    }
}

impl<D> Drop for EffectSlot<D> {
    fn drop(&mut self) {
        self.teardown();
    }
}
