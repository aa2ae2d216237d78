//! Shopping-cart store: the reducer example.

mod action;
mod ids;
mod price;
mod reducer;
mod state;
mod wire;

pub use action::CartAction;
pub use ids::{IdGenerator, ItemId, MonotonicIds, SequentialIds};
pub use price::{Price, PriceError};
pub use reducer::CartReducer;
pub use state::{CartItem, CartState};
pub use wire::{ActionError, WireAction};

use crate::mvi::Store;

/// Store type for the cart example.
pub type CartStore = Store<CartReducer>;
