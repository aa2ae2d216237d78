use crate::cart::ids::IdGenerator;
use crate::cart::price::Price;
use crate::cart::state::CartItem;
use crate::mvi::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Append an item. The id travels in the payload; the reducer never mints one.
    AddItem(CartItem),
    /// Remove the held item with the payload's id.
    ///
    /// The payload price is informational: the reducer subtracts the stored
    /// item's price, so a stale payload cannot skew the total.
    RemoveItem(CartItem),
    /// Action type outside this store's enumeration. Reduces to a no-op.
    Unrecognized(String),
}

impl CartAction {
    pub const ADD_ITEM: &'static str = "ADD_ITEM";
    pub const REMOVE_ITEM: &'static str = "REMOVE_ITEM";

    /// `ADD_ITEM` for a new line, minting its id from `ids`.
    pub fn add(ids: &dyn IdGenerator, item: impl Into<String>, price: Price) -> Self {
        Self::AddItem(CartItem::new(ids.next_id(), item, price))
    }

    /// `REMOVE_ITEM` for a held line.
    pub fn remove(item: &CartItem) -> Self {
        Self::RemoveItem(item.clone())
    }
}

impl Action for CartAction {
    fn name(&self) -> &'static str {
        match self {
            Self::AddItem(_) => Self::ADD_ITEM,
            Self::RemoveItem(_) => Self::REMOVE_ITEM,
            Self::Unrecognized(_) => "UNRECOGNIZED",
        }
    }
}
