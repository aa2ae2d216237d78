/// A request to change store state, consumed by exactly one `reduce` call.
pub trait Action: Send + 'static {
    /// Stable tag used in logs, e.g. `"ADD_ITEM"`.
    fn name(&self) -> &'static str;
}
