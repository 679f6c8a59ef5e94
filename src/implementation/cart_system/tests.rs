// ============================================================================
// TESTS
// ============================================================================

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use proptest::prelude::*;
use serde_json::json;

use super::*;
use crate::{
    implementation::persistence::{KeyValueStore, MemoryStore},
    types::product_catalog::{Product, ProductId},
};

const KEY: &str = "facyas-cart";

fn product(id: &str, price: f64) -> Arc<Product> {
    Arc::new(Product::new(id, format!("Product {}", id), price).with_category("serum"))
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn assert_invariants(state: &CartState) {
    let mut ids: Vec<&ProductId> = state.items().iter().map(CartLineItem::product_id).collect();
    let len = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), len, "duplicate product ids in {:?}", state.items());

    assert!(state.items().iter().all(|item| item.quantity >= 1));
    let total = state.items().iter().fold(0.0, |acc, i| acc + i.product.price * f64::from(i.quantity));
    let count: u64 = state.items().iter().map(|i| u64::from(i.quantity)).sum();
    assert_eq!(state.total(), total);
    assert_eq!(state.item_count(), count);
    assert!(state.total() >= 0.0);
}

fn new_store() -> (Arc<MemoryStore>, CartStore) {
    let storage = Arc::new(MemoryStore::new());
    let store = CartStore::rehydrate(storage.clone(), KEY);
    (storage, store)
}

fn saved_json(storage: &MemoryStore) -> serde_json::Value {
    let bytes = storage.peek(KEY).expect("cart should be saved");
    serde_json::from_slice(&bytes).expect("saved cart is JSON")
}

// ----------------------------------------------------------------------------
// Reducer
// ----------------------------------------------------------------------------

#[test]
fn test_add_new_and_existing_item() {
    let p1 = product("1", 55.0);
    let p2 = product("2", 19.99);

    let state = CartState::empty()
        .apply(&CartCommand::Add(p1.clone()))
        .apply(&CartCommand::Add(p2.clone()))
        .apply(&CartCommand::Add(p1.clone()));

    let ids: Vec<&str> = state.items().iter().map(|i| i.product_id().as_str()).collect();
    assert_eq!(ids, ["1", "2"]);
    assert_eq!(state.quantity_of(&p1.id), 2);
    assert_eq!(state.quantity_of(&p2.id), 1);
    assert_eq!(state.item_count(), 3);
    assert!(!state.is_open(), "adding never opens the cart");
}

#[test]
fn test_concrete_scenario() {
    let p1 = product("1", 55.00);
    let p2 = product("2", 19.99);

    let s1 = CartState::empty().apply(&CartCommand::Add(p1.clone()));
    assert_eq!(s1.items().len(), 1);
    assert!(approx_eq(s1.total(), 55.0));
    assert_eq!(s1.item_count(), 1);

    let s2 = s1.apply(&CartCommand::Add(p1.clone()));
    assert_eq!(s2.quantity_of(&p1.id), 2);
    assert!(approx_eq(s2.total(), 110.0));
    assert_eq!(s2.item_count(), 2);

    let s3 = s2.apply(&CartCommand::Add(p2.clone()));
    assert_eq!(s3.item_count(), 3);
    assert!(approx_eq(s3.total(), 129.99));

    let s4 = s3.apply(&CartCommand::SetQuantity { product_id: p1.id.clone(), quantity: 0 });
    assert_eq!(s4.items().len(), 1);
    assert_eq!(s4.items()[0].product_id(), &p2.id);
    assert!(approx_eq(s4.total(), 19.99));
    assert_eq!(s4.item_count(), 1);

    let s5 = s4.apply(&CartCommand::Clear);
    assert!(s5.is_empty());
    assert_eq!(s5.total(), 0.0);
    assert_eq!(s5.item_count(), 0);
}

#[test]
fn test_set_quantity_unknown_id_is_noop() {
    let state = CartState::empty().apply(&CartCommand::Add(product("1", 10.0)));
    let next = state.apply(&CartCommand::SetQuantity { product_id: "9".into(), quantity: 4 });
    assert_eq!(next, state);
}

#[test]
fn test_set_quantity_has_no_upper_bound() {
    let p = product("1", 1.0);
    let state = CartState::empty()
        .apply(&CartCommand::Add(p.clone()))
        .apply(&CartCommand::SetQuantity { product_id: p.id.clone(), quantity: i64::MAX });
    assert_eq!(state.quantity_of(&p.id), u32::MAX);

    // Adding past the integer width saturates instead of wrapping to zero.
    let state = state.apply(&CartCommand::Add(p.clone()));
    assert_eq!(state.quantity_of(&p.id), u32::MAX);
    assert_invariants(&state);
}

#[test]
fn test_clear_keeps_visibility() {
    let state = CartState::empty()
        .apply(&CartCommand::Add(product("1", 10.0)))
        .apply(&CartCommand::Open)
        .apply(&CartCommand::Clear);
    assert!(state.is_open());
    assert!(state.is_empty());
}

#[test]
fn test_visibility_commands() {
    let base = CartState::empty().apply(&CartCommand::Add(product("1", 10.0)));

    let opened = base.apply(&CartCommand::Open);
    assert!(opened.is_open());
    assert!(!opened.apply(&CartCommand::Close).is_open());
    assert!(!opened.apply(&CartCommand::Toggle).is_open());
    assert!(base.apply(&CartCommand::Toggle).is_open());

    for state in [&opened, &opened.apply(&CartCommand::Toggle)] {
        assert_eq!(state.items(), base.items());
        assert_eq!(state.total(), base.total());
        assert_eq!(state.item_count(), base.item_count());
    }
}

#[test]
fn test_line_item_keeps_first_product_record() {
    let original = product("1", 55.0);
    let repriced = product("1", 60.0);

    let state = CartState::empty()
        .apply(&CartCommand::Add(original))
        .apply(&CartCommand::Add(repriced));

    assert_eq!(state.items().len(), 1);
    assert_eq!(state.items()[0].product.price, 55.0);
    assert!(approx_eq(state.total(), 110.0));
}

#[test]
fn test_totals_include_sale_savings() {
    let collagen = Arc::new(Product::new("8", "GLUTATHIONE COLLAGEN", 289.0).on_sale_from(320.0));
    let state = CartState::empty()
        .apply(&CartCommand::Add(collagen.clone()))
        .apply(&CartCommand::Add(collagen));

    let totals = state.totals();
    assert!(approx_eq(totals.total, 578.0));
    assert!(approx_eq(totals.total_savings, 62.0));
    assert_eq!(totals.item_count, 2);
}

// ----------------------------------------------------------------------------
// Properties
// ----------------------------------------------------------------------------

fn arb_command() -> impl Strategy<Value = CartCommand> {
    let ids = prop::sample::select(vec!["1", "2", "3", "4"]);
    prop_oneof![
        4 => (ids.clone(), 0_u32..20_000).prop_map(|(id, cents)| {
            CartCommand::Add(product(id, f64::from(cents) / 100.0))
        }),
        1 => ids.clone().prop_map(|id| CartCommand::Remove(id.into())),
        2 => (ids, -5_i64..10).prop_map(|(id, quantity)| CartCommand::SetQuantity {
            product_id: id.into(),
            quantity,
        }),
        1 => Just(CartCommand::Clear),
        1 => Just(CartCommand::Toggle),
    ]
}

fn arb_state() -> impl Strategy<Value = CartState> {
    prop::collection::vec(arb_command(), 0..24).prop_map(|commands| {
        commands.iter().fold(CartState::empty(), |state, command| state.apply(command))
    })
}

proptest! {
    #[test]
    fn prop_invariants_hold_for_reachable_states(state in arb_state()) {
        assert_invariants(&state);
    }

    #[test]
    fn prop_remove_is_idempotent(state in arb_state(), id in "[1-5]") {
        let id = ProductId::new(id);
        let once = state.apply(&CartCommand::Remove(id.clone()));
        let twice = once.apply(&CartCommand::Remove(id));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_add_then_remove_is_inverse(state in arb_state(), cents in 0_u32..50_000) {
        let fresh = product("fresh", f64::from(cents) / 100.0);
        let back = state
            .apply(&CartCommand::Add(fresh.clone()))
            .apply(&CartCommand::Remove(fresh.id.clone()));
        prop_assert_eq!(back, state);
    }

    #[test]
    fn prop_repeated_add_counts_up(state in arb_state(), times in 1_u32..30) {
        let fresh = product("fresh", 12.5);
        let mut current = state.clone();
        for n in 1..=times {
            let next = current.apply(&CartCommand::Add(fresh.clone()));
            prop_assert_eq!(next.item_count(), current.item_count() + 1);
            prop_assert_eq!(next.quantity_of(&fresh.id), n);
            current = next;
        }
        prop_assert_eq!(current.items().iter().filter(|i| i.product_id() == &fresh.id).count(), 1);
    }

    #[test]
    fn prop_non_positive_quantity_equals_remove(state in arb_state(), id in "[1-4]", quantity in -50_i64..=0) {
        let id = ProductId::new(id);
        let removed = state.apply(&CartCommand::Remove(id.clone()));
        let zeroed = state.apply(&CartCommand::SetQuantity { product_id: id, quantity });
        prop_assert_eq!(zeroed, removed);
    }
}

// ----------------------------------------------------------------------------
// Store: write-through and observers
// ----------------------------------------------------------------------------

#[test]
fn test_store_writes_full_items_on_every_content_change() {
    let (storage, store) = new_store();
    let p1 = product("1", 55.0);
    let p2 = product("2", 19.99);

    store.add(p1.clone());
    store.add(p2.clone());
    store.set_quantity(&p1.id, 3);
    assert_eq!(storage.write_count(), 3);

    let saved = saved_json(&storage);
    let items = saved["items"].as_array().expect("items array");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["product"]["id"], "1");
    assert_eq!(items[0]["product"]["name"], "Product 1");
    assert_eq!(items[0]["quantity"], 3);
    assert_eq!(items[1]["product"]["price"], 19.99);
    assert_eq!(saved.as_object().map(|o| o.len()), Some(1), "payload only holds items");

    store.remove(&p2.id);
    store.remove(&p2.id);
    store.clear();
    assert_eq!(storage.write_count(), 6);
    assert_eq!(saved_json(&storage), json!({ "items": [] }));
}

#[test]
fn test_store_visibility_never_writes() {
    let (storage, store) = new_store();
    store.add(product("1", 10.0));
    let before = store.state();
    let writes = storage.write_count();

    store.open();
    store.toggle();
    store.toggle();
    let after = store.close();

    assert_eq!(storage.write_count(), writes);
    assert_eq!(after.items(), before.items());
    assert_eq!(after.total(), before.total());
    assert_eq!(after.item_count(), before.item_count());
}

#[test]
fn test_store_returns_fresh_snapshots() {
    let (_storage, store) = new_store();
    let before = store.state();
    let after = store.remove(&"missing".into());

    assert_eq!(*before, *after);
    assert!(!Arc::ptr_eq(&before, &after));
    assert!(Arc::ptr_eq(&after, &store.state()));
}

#[test]
fn test_store_write_failure_keeps_memory_state() {
    let storage = Arc::new(MemoryStore::with_quota(16));
    let store = CartStore::rehydrate(storage.clone(), KEY);

    let state = store.add(product("1", 55.0));
    assert_eq!(state.item_count(), 1);
    assert_eq!(store.state().item_count(), 1);
    assert_eq!(storage.write_count(), 0);
    assert!(storage.peek(KEY).is_none());
}

#[test]
fn test_observers_see_each_transition_in_order() {
    let (_storage, store) = new_store();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let id = store.subscribe(move |transition: &CartTransition| {
        sink.lock().expect("lock").push((
            transition.command.name(),
            transition.items_changed(),
            transition.current.item_count(),
        ));
    });

    let p = product("1", 5.0);
    store.add(p.clone());
    store.open();
    store.set_quantity(&p.id, 4);

    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    store.clear();

    let seen = seen.lock().expect("lock");
    assert_eq!(*seen, vec![("add", true, 1), ("open", false, 1), ("set_quantity", true, 4)]);
}

#[test]
fn test_observer_may_call_back_into_store() {
    let (_storage, store) = new_store();
    let store = Arc::new(store);
    let calls = Arc::new(AtomicUsize::new(0));

    let handle = Arc::downgrade(&store);
    let counter = calls.clone();
    store.subscribe(move |transition: &CartTransition| {
        counter.fetch_add(1, Ordering::SeqCst);
        // Auto-open on add is a caller policy layered on top of the store.
        if matches!(transition.command, CartCommand::Add(_)) {
            if let Some(store) = handle.upgrade() {
                store.open();
            }
        }
    });

    store.add(product("1", 5.0));
    assert!(store.state().is_open());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

// ----------------------------------------------------------------------------
// Rehydration
// ----------------------------------------------------------------------------

#[test]
fn test_rehydrate_absent_record() {
    let storage = MemoryStore::new();
    let (state, outcome) = rehydrate(&storage, KEY);

    assert_eq!(state, CartState::empty());
    assert_eq!(outcome, Rehydration::Empty);
    assert_eq!(storage.remove_count(), 0);
}

#[test]
fn test_rehydrate_replays_entries() {
    let payload = json!({
        "items": [
            { "product": { "id": "1", "name": "PERFECTLY FACE CREAM", "price": 55.0, "category": "moisturizer", "skinType": ["dry"] }, "quantity": 2 },
            { "product": { "name": "no id", "price": 1.0 }, "quantity": 5 },
            { "product": { "id": "2", "name": "SUPER SUNSCREEN", "price": 45.0 }, "quantity": 1 },
            { "quantity": 3 },
            { "product": { "id": "", "name": "blank id", "price": 1.0 } }
        ]
    });
    let storage = MemoryStore::seeded(KEY, payload.to_string());

    let (state, outcome) = rehydrate(&storage, KEY);

    assert_eq!(outcome, Rehydration::Restored { replayed: 2, skipped: 3 });
    assert_eq!(state.items().len(), 2);
    assert_eq!(state.quantity_of(&"1".into()), 2);
    assert_eq!(state.quantity_of(&"2".into()), 1);
    assert_eq!(state.items()[0].product.skin_type, vec!["dry".to_string()]);
    assert!(approx_eq(state.total(), 155.0));
    assert!(!state.is_open());
    assert_invariants(&state);
}

#[test]
fn test_rehydrate_skips_negative_prices() {
    let payload = json!({
        "items": [
            { "product": { "id": "1", "name": "A", "price": -40.0 }, "quantity": 2 },
            { "product": { "id": "2", "name": "B", "price": 0.0 }, "quantity": 3 },
            { "product": { "id": "3", "name": "C", "price": 12.5 }, "quantity": 1 }
        ]
    });
    let storage = MemoryStore::seeded(KEY, payload.to_string());

    let (state, outcome) = rehydrate(&storage, KEY);

    assert_eq!(outcome, Rehydration::Restored { replayed: 2, skipped: 1 });
    assert_eq!(state.quantity_of(&"1".into()), 0);
    assert_eq!(state.quantity_of(&"2".into()), 3);
    assert!(approx_eq(state.total(), 12.5));
    assert_eq!(state.item_count(), 4);
    assert_invariants(&state);
}

#[test]
fn test_rehydrate_merges_duplicate_ids() {
    let payload = json!({
        "items": [
            { "product": { "id": "1", "name": "A", "price": 10.0 }, "quantity": 3 },
            { "product": { "id": "1", "name": "A", "price": 10.0 }, "quantity": 1 },
            { "product": { "id": "1", "name": "A", "price": 10.0 }, "quantity": 0 }
        ]
    });
    let storage = MemoryStore::seeded(KEY, payload.to_string());

    let (state, _) = rehydrate(&storage, KEY);

    // Replay: add (1) + set 3, add (4), add (5).
    assert_eq!(state.items().len(), 1);
    assert_eq!(state.quantity_of(&"1".into()), 5);
    assert_invariants(&state);
}

#[test]
fn test_rehydrate_discards_corrupt_record() {
    for corrupt in ["{not json", "[1,2,3]", r#"{"items": 7}"#, r#"{"cart": []}"#] {
        let storage = MemoryStore::seeded(KEY, corrupt);

        let (state, outcome) = rehydrate(&storage, KEY);

        assert_eq!(state, CartState::empty(), "payload {corrupt:?}");
        assert_eq!(outcome, Rehydration::Discarded);
        assert!(storage.peek(KEY).is_none(), "corrupt record must be deleted");

        // The next load finds nothing instead of failing again.
        assert_eq!(rehydrate(&storage, KEY).1, Rehydration::Empty);
    }
}

#[test]
fn test_rehydrated_store_round_trips_through_storage() {
    let storage = Arc::new(MemoryStore::new());
    {
        let store = CartStore::rehydrate(storage.clone(), KEY);
        let p1 = product("1", 55.0);
        store.add(p1.clone());
        store.add(p1.clone());
        store.add(product("2", 19.99));
        store.open();
    }

    let store = CartStore::rehydrate(storage.clone() as Arc<dyn KeyValueStore>, KEY);

    assert_eq!(store.rehydration(), Rehydration::Restored { replayed: 2, skipped: 0 });
    let state = store.state();
    assert_eq!(state.item_count(), 3);
    assert!(approx_eq(state.total(), 129.99));
    assert!(!state.is_open(), "visibility is not persisted");
    // Rehydration itself performs no writes.
    assert_eq!(storage.write_count(), 3);
}

proptest! {
    #[test]
    fn prop_rehydration_preserves_invariants(
        entries in prop::collection::vec(("[1-4]", -5_000_i32..10_000, -3_i64..8), 0..12)
    ) {
        let items: Vec<_> = entries
            .iter()
            .map(|(id, cents, quantity)| json!({
                "product": { "id": id, "name": format!("P{id}"), "price": f64::from(*cents) / 100.0 },
                "quantity": quantity,
            }))
            .collect();
        let storage = MemoryStore::seeded(KEY, json!({ "items": items }).to_string());

        let (state, outcome) = rehydrate(&storage, KEY);

        let negative = entries.iter().filter(|(_, cents, _)| *cents < 0).count();
        prop_assert_eq!(
            outcome,
            Rehydration::Restored { replayed: entries.len() - negative, skipped: negative }
        );
        assert_invariants(&state);
    }
}

// ----------------------------------------------------------------------------
// Long runs (cargo test --features full-tests)
// ----------------------------------------------------------------------------

#[cfg(feature = "full-tests")]
mod long_runs {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(4096))]

        #[test]
        fn prop_long_sessions_keep_invariants(
            commands in prop::collection::vec(arb_command(), 0..256)
        ) {
            let mut state = CartState::empty();
            for command in &commands {
                state = state.apply(command);
                assert_invariants(&state);
            }
        }

        #[test]
        fn prop_long_sessions_survive_rehydration(
            commands in prop::collection::vec(arb_command(), 0..256)
        ) {
            let storage = Arc::new(MemoryStore::new());
            let store = CartStore::rehydrate(storage.clone(), KEY);
            for command in commands {
                store.dispatch(command);
            }

            let restored = CartStore::rehydrate(storage, KEY);
            let restored_state = restored.state();
            let store_state = store.state();
            prop_assert_eq!(restored_state.items(), store_state.items());
            prop_assert_eq!(restored.state().item_count(), store.state().item_count());
        }
    }
}
