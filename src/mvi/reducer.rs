use super::action::Action;
use super::state::StoreState;

/// State transition function for one store.
///
/// `reduce` consumes the current state and one action and returns the next
/// state. It performs no I/O, never panics on a well-typed action, and
/// returns `state` untouched for actions that do not apply (an unknown id,
/// an unrecognized type). The store relies on that last rule to keep the
/// snapshot identity of no-op transitions.
pub trait Reducer: 'static {
    type State: StoreState;
    type Action: Action;

    fn reduce(state: Self::State, action: Self::Action) -> Self::State;
}
