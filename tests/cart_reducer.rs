mod common;

use common::{add, empty_cart, item, remove};
use statecraft::cart::{
    CartAction, CartReducer, CartState, CartStore, IdGenerator, ItemId, MonotonicIds, Price,
    SequentialIds, WireAction,
};
use statecraft::mvi::Reducer;
use std::sync::Arc;

/// Replaying ADD_ITEMs with distinct ids counts every item and sums every price.
#[test]
fn test_adds_accumulate_quantity_and_total() {
    let prices = [10, 20, 5, 0, 99];
    let state = prices
        .iter()
        .enumerate()
        .fold(empty_cart(), |state, (i, price)| {
            CartReducer::reduce(state, add(i as u64 + 1, &format!("Item {}", i + 1), *price))
        });

    assert_eq!(state.quantity, prices.len());
    assert_eq!(state.cart.len(), prices.len());
    assert_eq!(state.total, Price::from_major(prices.iter().sum()));
}

/// Removing an id that is not held returns an equal state.
#[test]
fn test_remove_absent_id_is_noop() {
    let state = CartReducer::reduce(empty_cart(), add(1, "Item 1", 10));
    let next = CartReducer::reduce(state.clone(), remove(2, "Item 2", 20));
    assert_eq!(next, state);
}

/// The store keeps the very same snapshot when a remove matches nothing.
#[test]
fn test_store_keeps_snapshot_identity_on_noop_remove() {
    let store = CartStore::new(CartState::default());
    store.dispatch(add(1, "Item 1", 10));
    let before = store.get_state();

    store.dispatch(remove(99, "Ghost", 1));
    assert!(Arc::ptr_eq(&before, &store.get_state()));
}

/// Remove then re-add with the same fields: same counters, different id.
#[test]
fn test_remove_then_readd_restores_counters_with_new_id() {
    let ids = SequentialIds::new();
    let store = CartStore::new(CartState::default());

    store.dispatch(CartAction::add(&ids, "Item 1", Price::from_major(10)));
    let first = store.get_state();
    let held = first.cart[0].clone();

    store.dispatch(CartAction::remove(&held));
    store.dispatch(CartAction::add(&ids, "Item 1", Price::from_major(10)));
    let second = store.get_state();

    assert_eq!(second.quantity, first.quantity);
    assert_eq!(second.total, first.total);
    assert_eq!(second.cart[0].item, held.item);
    assert_ne!(second.cart[0].id, held.id);
}

/// Same inputs, same output.
#[test]
fn test_reducer_is_pure() {
    let state = CartReducer::reduce(empty_cart(), add(1, "Item 1", 10));
    let action = add(2, "Item 2", 20);
    assert_eq!(
        CartReducer::reduce(state.clone(), action.clone()),
        CartReducer::reduce(state, action)
    );
}

/// Add Item 1 @10 and Item 2 @20, then remove Item 1.
#[test]
fn test_two_items_then_remove_first() {
    let store = CartStore::new(empty_cart());
    store.dispatch(add(1, "Item 1", 10));
    store.dispatch(add(2, "Item 2", 20));

    let state = store.get_state();
    assert_eq!(state.quantity, 2);
    assert_eq!(state.total, Price::from_major(30));

    store.dispatch(remove(1, "Item 1", 10));
    let state = store.get_state();
    assert_eq!(state.quantity, 1);
    assert_eq!(state.total, Price::from_major(20));
    assert_eq!(state.cart, vec![item(2, "Item 2", 20)]);
}

/// Removing a never-added id from an empty cart leaves it empty.
#[test]
fn test_remove_from_empty_cart() {
    let next = CartReducer::reduce(empty_cart(), remove(7, "Item 7", 70));
    assert_eq!(next, empty_cart());
}

/// A stale price on the remove payload does not skew the total.
#[test]
fn test_remove_subtracts_stored_price() {
    let state = CartReducer::reduce(empty_cart(), add(1, "Item 1", 10));
    let state = CartReducer::reduce(state, add(2, "Item 2", 20));
    let state = CartReducer::reduce(state, remove(1, "Item 1", 999));
    assert_eq!(state.total, Price::from_major(20));
    assert_eq!(state.quantity, 1);
}

/// A second ADD_ITEM with a held id is ignored.
#[test]
fn test_duplicate_id_add_is_ignored() {
    let state = CartReducer::reduce(empty_cart(), add(1, "Item 1", 10));
    let next = CartReducer::reduce(state.clone(), add(1, "Other", 50));
    assert_eq!(next, state);
}

/// Unknown action types reduce to the same state.
#[test]
fn test_unrecognized_action_is_noop() {
    let state = CartReducer::reduce(empty_cart(), add(1, "Item 1", 10));
    let next = CartReducer::reduce(state.clone(), CartAction::Unrecognized("CLEAR".into()));
    assert_eq!(next, state);
}

/// Ids minted in a tight loop never repeat, even when the clock stands still.
#[test]
fn test_monotonic_ids_unique_under_frozen_clock() {
    let ids = MonotonicIds::with_clock(|| 1_700_000_000_000);
    let minted: Vec<ItemId> = (0..100).map(|_| ids.next_id()).collect();
    let mut sorted = minted.clone();
    sorted.dedup();
    assert_eq!(sorted.len(), minted.len());
    assert!(minted.windows(2).all(|pair| pair[0] < pair[1]));
}

/// A session replayed from its wire form reaches the same state.
#[test]
fn test_wire_replay_matches_direct_dispatch() {
    let actions = vec![
        add(1, "Item 1", 10),
        add(2, "Item 2", 20),
        remove(1, "Item 1", 10),
    ];
    let direct = CartStore::new(empty_cart());
    direct.dispatch_all(actions.clone());

    let replayed = CartStore::new(empty_cart());
    for action in &actions {
        let text = serde_json::to_string(&WireAction::from(action)).unwrap();
        replayed.dispatch(WireAction::parse(&text).unwrap().decode().unwrap());
    }
    assert_eq!(direct.get_state(), replayed.get_state());
}

/// Decimal prices keep cent precision through the total.
#[test]
fn test_decimal_prices_sum_exactly() {
    let store = CartStore::new(empty_cart());
    let ids = SequentialIds::new();
    for price in ["0.10", "0.20", "$19.99"] {
        store.dispatch(CartAction::add(&ids, "thing", price.parse().unwrap()));
    }
    assert_eq!(store.get_state().total, Price::from_cents(2029));
    assert_eq!(store.get_state().total.to_string(), "20.29");
}
