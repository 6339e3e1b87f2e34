//! Test harness for the bus-ticketing client.
//!
//! # Recording transport
//!
//! [`RecordingTransport`] stands in for HTTP: it records every request the
//! client builds and replays queued responses. Tests assert on the requests
//! the same production code issues.
//!
//! # Invariant testing
//!
//! The `invariants` module checks store transitions. Invariants verify WHAT
//! must be true after every dispatch, not specific scenarios. Use
//! [`InvariantRegistry::standard()`] for the store invariants.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod recording;

pub use invariants::{
    AppendOnlyReservations, FieldLocality, Invariant, InvariantRegistry, InvariantResult,
    LogoutClearsSession, ReplacementMatchesPayload, Transition, UnrecognizedIsNoop, Violation,
};
pub use recording::RecordingTransport;
