//! StateBag behavior across the request/response boundary.

use viewstate::state::{Snapshot, StateBag, TrackedState, Value};

#[test]
fn test_round_trip_through_payload() {
    let mut bag = StateBag::new();
    bag.set("title", "Orders");
    bag.set("page", 1);
    bag.track_start();
    bag.set("page", 3);
    bag.set("sorted", true);

    let payload = bag.save().unwrap().encode().unwrap();

    // Next request: freshly declared bag, replay the decoded payload.
    let mut bag = StateBag::new();
    bag.set("title", "Orders");
    bag.set("page", 1);
    bag.load(&Snapshot::decode(&payload).unwrap()).unwrap();

    assert_eq!(bag.get_int("page", 0), 3);
    assert!(bag.get_bool("sorted", false));
    assert_eq!(bag.get_text("title", ""), "Orders");
}

#[test]
fn test_load_then_track_is_clean() {
    let mut source = StateBag::new();
    source.track_start();
    source.set("k", "v");
    let snapshot = source.save().unwrap();

    // Load before track_start, per the round-trip contract: the replayed
    // write must not look like an application mutation.
    let mut bag = StateBag::new();
    bag.load(&snapshot).unwrap();
    bag.track_start();
    assert!(bag.save().is_none());
}

#[test]
fn test_equal_value_rewrite_forces_resend() {
    let mut bag = StateBag::new();
    bag.set("k", "same");
    bag.track_start();
    bag.set("k", "same");

    let Some(Snapshot::Bag(entries)) = bag.save() else {
        panic!("expected a bag snapshot");
    };
    assert_eq!(entries.get("k"), Some(&Value::Text("same".to_string())));
}

#[test]
fn test_save_full_ignores_tracking() {
    let mut bag = StateBag::new();
    bag.set("a", 1);
    bag.set("b", 2);

    // Untracked, nothing dirty, yet the full capture carries everything.
    assert!(bag.save().is_none());
    let Some(Snapshot::Bag(entries)) = bag.save_full() else {
        panic!("expected a bag snapshot");
    };
    assert_eq!(entries.len(), 2);

    assert!(StateBag::new().save_full().is_none());
}

#[test]
fn test_value_kinds_survive_the_payload() {
    let mut bag = StateBag::new();
    bag.track_start();
    bag.set("null", Value::Null);
    bag.set("bool", false);
    bag.set("int", -42);
    bag.set("text", "café");

    let payload = bag.save().unwrap().encode().unwrap();
    let mut fresh = StateBag::new();
    fresh.load(&Snapshot::decode(&payload).unwrap()).unwrap();

    assert_eq!(fresh.get("null"), Some(&Value::Null));
    assert_eq!(fresh.get("bool"), Some(&Value::Bool(false)));
    assert_eq!(fresh.get("int"), Some(&Value::Int(-42)));
    assert_eq!(fresh.get("text"), Some(&Value::Text("café".to_string())));
}
