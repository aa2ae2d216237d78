use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// An accessor ran with no enclosing provider for its context.
    #[error("{context} must be used within its provider")]
    Unbound { context: &'static str },
}

/// Type-level name of a context and the capability it carries.
pub trait ContextKey: 'static {
    type Value: Clone + Send + Sync + 'static;

    /// Accessor name reported in [`ContextError::Unbound`].
    const NAME: &'static str;
}

/// Immutable set of context bindings.
///
/// `provide` returns a child scope; the parent is untouched, so siblings
/// outside the provider keep failing with `Unbound`. Inner bindings shadow
/// outer ones for the same key.
#[derive(Clone, Default)]
pub struct Scope {
    bindings: Arc<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl Scope {
    /// Scope with no providers.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn provide<K: ContextKey>(&self, value: K::Value) -> Scope {
        let mut bindings = HashMap::clone(&self.bindings);
        bindings.insert(TypeId::of::<K>(), Arc::new(value));
        Scope {
            bindings: Arc::new(bindings),
        }
    }

    pub fn get<K: ContextKey>(&self) -> Result<K::Value, ContextError> {
        self.bindings
            .get(&TypeId::of::<K>())
            .and_then(|value| value.downcast_ref::<K::Value>())
            .cloned()
            .ok_or(ContextError::Unbound { context: K::NAME })
    }

    pub fn is_bound<K: ContextKey>(&self) -> bool {
        self.bindings.contains_key(&TypeId::of::<K>())
    }
}

impl std::fmt::Debug for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope")
            .field("bindings", &self.bindings.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    enum Greeting {}

    impl ContextKey for Greeting {
        type Value = String;
        const NAME: &'static str = "use_greeting";
    }

    #[test]
    fn unbound_key_fails() {
        let err = Scope::root().get::<Greeting>().unwrap_err();
        assert_eq!(err, ContextError::Unbound { context: "use_greeting" });
        assert_eq!(err.to_string(), "use_greeting must be used within its provider");
    }

    #[test]
    fn child_scope_sees_binding_parent_does_not() {
        let root = Scope::root();
        let child = root.provide::<Greeting>("hi".to_string());
        assert_eq!(child.get::<Greeting>().unwrap(), "hi");
        assert!(!root.is_bound::<Greeting>());
    }

    #[test]
    fn inner_binding_shadows_outer() {
        let outer = Scope::root().provide::<Greeting>("outer".to_string());
        let inner = outer.provide::<Greeting>("inner".to_string());
        assert_eq!(inner.get::<Greeting>().unwrap(), "inner");
        assert_eq!(outer.get::<Greeting>().unwrap(), "outer");
    }
}
