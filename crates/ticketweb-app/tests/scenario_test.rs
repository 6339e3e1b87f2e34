//! Store scenarios driven through the wire envelope.
//!
//! Commands arrive as `{"type", "payload"}` JSON, the way a view would emit
//! them.

use ticketweb_app::{Command, Store};
use ticketweb_harness::{InvariantRegistry, Transition};

fn apply(store: &mut Store, registry: &InvariantRegistry, json: &str) {
    let command = Command::from_json(json).unwrap();
    let before = store.current();
    let after = store.dispatch(command.clone());
    registry.assert_all(&Transition::new(&before, &command, &after), json);
}

#[test]
fn companies_then_reservation() {
    let registry = InvariantRegistry::standard();
    let mut store = Store::default();

    apply(
        &mut store,
        &registry,
        r#"{"type": "SET_COMPANIES", "payload": [{"id": 1, "name": "A"}]}"#,
    );
    apply(&mut store, &registry, r#"{"type": "ADD_RESERVATION", "payload": {"id": 9}}"#);

    let snapshot = store.current();
    let reservation_ids: Vec<_> = snapshot.reservations.iter().map(|r| r.id).collect();
    assert_eq!(reservation_ids, [9]);
    assert_eq!(snapshot.companies.len(), 1);
    assert_eq!(snapshot.companies[0].id, 1);
    assert_eq!(snapshot.companies[0].name, "A");
}

#[test]
fn session_lifecycle() {
    let registry = InvariantRegistry::standard();
    let mut store = Store::default();

    apply(
        &mut store,
        &registry,
        r#"{"type": "SET_USER", "payload": {"user": {"id": 4, "username": "minh", "role": 1}, "token": "abc"}}"#,
    );
    assert_eq!(store.snapshot().user.as_ref().map(|u| u.id), Some(4));
    assert_eq!(store.snapshot().token.as_deref(), Some("abc"));

    apply(&mut store, &registry, r#"{"type": "LOGOUT"}"#);
    assert!(!store.snapshot().is_authenticated());
    assert_eq!(store.snapshot().token, None);
}

#[test]
fn set_user_with_null_user_clears_identity() {
    let registry = InvariantRegistry::standard();
    let mut store = Store::default();
    apply(
        &mut store,
        &registry,
        r#"{"type": "SET_USER", "payload": {"user": {"id": 4}, "token": "abc"}}"#,
    );

    let cleared = r#"{"type": "SET_USER", "payload": {"user": null, "token": null}}"#;
    apply(&mut store, &registry, cleared);

    assert_eq!(store.snapshot().user, None);
    assert_eq!(store.snapshot().token, None);
    assert_eq!(store.version(), 2);
}

#[test]
fn unknown_tag_is_ignored() {
    let registry = InvariantRegistry::standard();
    let mut store = Store::default();
    apply(&mut store, &registry, r#"{"type": "SET_BUSES", "payload": [{"id": 3}]}"#);
    let before = store.current();

    apply(&mut store, &registry, r#"{"type": "SET_WEATHER", "payload": {"sunny": true}}"#);

    assert_eq!(*store.current(), *before);
    assert_eq!(store.version(), 1);
}

#[test]
fn set_replaces_while_add_accumulates() {
    let registry = InvariantRegistry::standard();
    let mut store = Store::default();

    apply(&mut store, &registry, r#"{"type": "ADD_RESERVATION", "payload": {"id": 1}}"#);
    apply(&mut store, &registry, r#"{"type": "ADD_RESERVATION", "payload": {"id": 2}}"#);
    apply(&mut store, &registry, r#"{"type": "SET_RESERVATIONS", "payload": [{"id": 7}]}"#);
    apply(&mut store, &registry, r#"{"type": "ADD_RESERVATION", "payload": {"id": 8}}"#);

    let ids: Vec<_> = store.snapshot().reservations.iter().map(|r| r.id).collect();
    assert_eq!(ids, [7, 8]);
}
