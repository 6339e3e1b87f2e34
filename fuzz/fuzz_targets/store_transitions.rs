//! Fuzz target for store transitions
//!
//! # Strategy
//!
//! - Envelopes: every known tag plus junk tags
//! - Payloads: lists of ids, single records, sessions with and without token
//!
//! # Invariants
//!
//! - Every transition passes the standard invariant registry
//! - The version counts recognized commands only

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use serde_json::{Value, json};
use ticketweb_app::{Command, Store, command::TAGS};
use ticketweb_harness::{InvariantRegistry, Transition};

#[derive(Debug, Arbitrary)]
enum TagChoice {
    Known(u8),
    Junk(String),
}

#[derive(Debug, Arbitrary)]
enum PayloadChoice {
    Ids(Vec<u8>),
    Record(u8),
    Session { id: u8, token: Option<String> },
    Missing,
}

#[derive(Debug, Arbitrary)]
struct Op {
    tag: TagChoice,
    payload: PayloadChoice,
}

fn envelope(op: Op) -> Value {
    let tag = match op.tag {
        TagChoice::Known(index) => TAGS[usize::from(index) % TAGS.len()].to_owned(),
        TagChoice::Junk(tag) => tag,
    };
    let payload = match op.payload {
        PayloadChoice::Ids(ids) => ids.into_iter().map(|id| json!({"id": id})).collect(),
        PayloadChoice::Record(id) => json!({"id": id}),
        PayloadChoice::Session { id, token } => json!({"user": {"id": id}, "token": token}),
        PayloadChoice::Missing => return json!({"type": tag}),
    };
    json!({"type": tag, "payload": payload})
}

fuzz_target!(|ops: Vec<Op>| {
    let registry = InvariantRegistry::standard();
    let mut store = Store::default();
    let mut recognized = 0u64;

    for op in ops {
        let Ok(command) = Command::decode(&envelope(op)) else {
            continue;
        };
        if command.is_recognized() {
            recognized += 1;
        }

        let before = store.current();
        let after = store.dispatch(command.clone());
        registry.assert_all(&Transition::new(&before, &command, &after), "fuzz");
    }

    assert_eq!(store.version(), recognized);
});
