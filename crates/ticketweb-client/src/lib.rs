//! Client side of the bus-ticketing API.
//!
//! The endpoint directory ([`Endpoint`]) describes every remote operation as
//! a request shape. [`ApiClient`] sends those requests through a
//! [`Transport`] and decodes the results into `ticketweb-proto` types.
//!
//! # Components
//!
//! - [`ClientConfig`]: API root and bearer credential, built once at startup
//! - [`Endpoint`] / [`OPERATIONS`]: the static catalog
//! - [`Transport`] / [`HttpTransport`]: request execution
//! - [`TokenStore`]: where the credential lives between runs
//!
//! Nothing here retries, caches or reorders requests. Failures reach the
//! caller as [`ClientError`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod client;
mod config;
mod endpoint;
mod error;
mod token_store;
mod transport;

pub use client::ApiClient;
pub use config::{ClientConfig, DEFAULT_API_URL};
pub use endpoint::{Endpoint, HttpRequest, Method, OPERATIONS, Operation};
pub use error::ClientError;
pub use token_store::{FileTokenStore, MemoryTokenStore, TOKEN_FILE_NAME, TokenStore};
pub use transport::{HttpTransport, Transport};
