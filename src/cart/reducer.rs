use crate::cart::action::CartAction;
use crate::cart::state::CartState;
use crate::mvi::Reducer;

pub struct CartReducer;

impl Reducer for CartReducer {
    type State = CartState;
    type Action = CartAction;

    fn reduce(state: Self::State, action: Self::Action) -> Self::State {
        match action {
            CartAction::AddItem(item) => {
                if state.find(item.id).is_some() {
                    // Ids must stay unique among held items
                    return state;
                }
                let CartState {
                    mut cart,
                    quantity,
                    total,
                } = state;
                let total = total.saturating_add(item.price);
                cart.push(item);
                CartState {
                    cart,
                    quantity: quantity + 1,
                    total,
                }
            }
            CartAction::RemoveItem(payload) => {
                let Some(index) = state.cart.iter().position(|entry| entry.id == payload.id)
                else {
                    return state;
                };
                let CartState {
                    mut cart,
                    quantity,
                    total,
                } = state;
                let removed = cart.remove(index);
                CartState {
                    cart,
                    quantity: quantity.saturating_sub(1),
                    total: total.saturating_sub(removed.price),
                }
            }
            CartAction::Unrecognized(_) => state,
        }
    }
}
