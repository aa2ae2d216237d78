use std::io::{self, Write};
use std::sync::Arc;

use super::{Lesson, ShellError};
use crate::cart::{
    CartAction, CartItem, CartState, CartStore, IdGenerator, ItemId, Price, WireAction,
};
use crate::mvi::Action;

const ADD_USAGE: &str = "add <name...> <price>";
const REMOVE_USAGE: &str = "remove <id>";
const DISPATCH_USAGE: &str = "dispatch <json action>";

/// Shopping cart driven by `ADD_ITEM` / `REMOVE_ITEM`.
pub struct CartLesson {
    store: CartStore,
    ids: Arc<dyn IdGenerator>,
}

impl CartLesson {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            store: CartStore::new(CartState::default()),
            ids,
        }
    }

    pub fn store(&self) -> &CartStore {
        &self.store
    }

    fn apply(&self, action: CartAction, out: &mut dyn Write) -> Result<(), ShellError> {
        let name = action.name();
        let before = self.store.get_state();
        self.store.dispatch(action);
        if Arc::ptr_eq(&before, &self.store.get_state()) {
            writeln!(out, "{name}: state unchanged")?;
        }
        Ok(())
    }
}

impl Lesson for CartLesson {
    fn title(&self) -> &'static str {
        "useReducer: shopping cart"
    }

    fn commands(&self) -> &'static [(&'static str, &'static str)] {
        &[
            (ADD_USAGE, "add an item, e.g. `add Item 1 10`"),
            (REMOVE_USAGE, "remove the item with that id"),
            (DISPATCH_USAGE, "dispatch a raw action, e.g. {\"type\":\"ADD_ITEM\",..}"),
            ("export", "print the cart as replayable ADD_ITEM actions"),
        ]
    }

    fn render(&mut self, out: &mut dyn Write) -> io::Result<()> {
        let state = self.store.get_state();
        if state.is_empty() {
            writeln!(out, "Cart is empty")?;
        }
        for line in &state.cart {
            writeln!(out, "  #{}  {}  ${}", line.id, line.item, line.price)?;
        }
        writeln!(out, "Quantity: {}  Total: ${}", state.quantity, state.total)
    }

    fn execute(
        &mut self,
        command: &str,
        args: &[&str],
        out: &mut dyn Write,
    ) -> Result<(), ShellError> {
        match command {
            "add" => {
                let [name @ .., price] = args else {
                    return Err(ShellError::Usage(ADD_USAGE));
                };
                if name.is_empty() {
                    return Err(ShellError::Usage(ADD_USAGE));
                }
                let price: Price = price.parse()?;
                let action = CartAction::add(self.ids.as_ref(), name.join(" "), price);
                self.apply(action, out)
            }
            "remove" => {
                let [id] = args else {
                    return Err(ShellError::Usage(REMOVE_USAGE));
                };
                let id: ItemId = id.parse().map_err(|_| ShellError::Usage(REMOVE_USAGE))?;
                // An id that is not held still dispatches; the reducer ignores it.
                let item = self
                    .store
                    .get_state()
                    .find(id)
                    .cloned()
                    .unwrap_or_else(|| CartItem::new(id, "", Price::ZERO));
                self.apply(CartAction::remove(&item), out)
            }
            "dispatch" => {
                if args.is_empty() {
                    return Err(ShellError::Usage(DISPATCH_USAGE));
                }
                let action = WireAction::parse(&args.join(" "))?.decode()?;
                self.apply(action, out)
            }
            "export" => {
                for line in &self.store.get_state().cart {
                    let wire = WireAction::from(&CartAction::AddItem(line.clone()));
                    let json = serde_json::to_string(&wire).map_err(io::Error::other)?;
                    writeln!(out, "{json}")?;
                }
                Ok(())
            }
            _ => Err(ShellError::UnknownCommand(command.to_string())),
        }
    }
}
