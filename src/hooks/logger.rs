use std::fmt::Debug;

use super::effect::{Cleanup, EffectSlot};

/// Logs a value every time it changes, including the first observation.
pub struct UpdateLogger<T> {
    label: &'static str,
    effect: EffectSlot<T>,
}

impl<T: Debug + Clone + PartialEq> UpdateLogger<T> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            effect: EffectSlot::new(),
        }
    }

    /// Returns whether a log line was emitted.
    pub fn observe(&mut self, value: &T) -> bool {
        let label = self.label;
        self.effect.run(value.clone(), |value| {
            tracing::info!(label, value = ?value, "Value updated");
            Cleanup::none()
        })
    }
}
