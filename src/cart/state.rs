use serde::{Deserialize, Serialize};

use crate::cart::ids::ItemId;
use crate::cart::price::Price;
use crate::mvi::StoreState;

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ItemId,
    pub item: String,
    pub price: Price,
}

impl CartItem {
    pub fn new(id: ItemId, item: impl Into<String>, price: Price) -> Self {
        Self {
            id,
            item: item.into(),
            price,
        }
    }
}

/// Cart contents plus the derived counters.
///
/// `quantity` always equals `cart.len()` and `total` the sum of held prices.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartState {
    pub cart: Vec<CartItem>,
    pub quantity: usize,
    pub total: Price,
}

impl StoreState for CartState {}

impl CartState {
    pub fn find(&self, id: ItemId) -> Option<&CartItem> {
        self.cart.iter().find(|entry| entry.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }
}
