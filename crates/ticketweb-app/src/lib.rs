//! Application layer for the bus-ticketing client.
//!
//! A pure state store and the view flows built on it, kept free of I/O
//! details so tests drive the same code the binary runs.
//!
//! # Components
//!
//! - [`Snapshot`]: one immutable version of the client state
//! - [`Command`]: tagged state transitions and their wire envelope
//! - [`reduce`] / [`Store`]: the transition function and its holder
//! - [`RouteTable`]: navigation paths to [`View`]s
//! - [`Runtime`]: remote calls followed by the matching dispatch

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod command;
mod route;
mod runtime;
mod state;
mod store;

pub use command::{Command, CommandError};
pub use route::{RouteTable, View};
pub use runtime::Runtime;
pub use state::{Field, Snapshot};
pub use store::{Store, reduce};
