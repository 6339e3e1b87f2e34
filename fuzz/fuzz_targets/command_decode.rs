//! Fuzz target for `Command::from_json`
//!
//! Arbitrary text is decoded as a command envelope. Malformed JSON, wrong
//! payload shapes and unknown tags must come back as errors or as
//! `Unrecognized`, never as a panic. Whatever decodes is dispatched so the
//! reducer sees it too.

#![no_main]

use libfuzzer_sys::fuzz_target;
use ticketweb_app::{Command, Store};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(command) = Command::from_json(text) else {
        return;
    };

    let recognized = command.is_recognized();
    let mut store = Store::default();
    store.dispatch(command);
    assert_eq!(store.version(), u64::from(recognized));
});
