/// Value a [`Store`](super::Store) can hold.
///
/// `PartialEq` lets the store spot transitions that changed nothing; `Sync`
/// lets snapshots cross threads as `Arc<Self>`.
pub trait StoreState: Clone + PartialEq + Send + Sync + 'static {}

macro_rules! plain_state {
    ($($ty:ty),* $(,)?) => {
        $(impl StoreState for $ty {})*
    };
}

plain_state!(bool, i32, i64, u16, u32, u64, usize, String);

impl<T: StoreState> StoreState for Option<T> {}

impl<T: StoreState> StoreState for Vec<T> {}
