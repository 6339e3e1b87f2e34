//! CLI error types.

use std::io;

use thiserror::Error;
use ticketweb_client::ClientError;

/// Errors surfaced to the user by the binary.
#[derive(Error, Debug)]
pub enum CliError {
    /// The API call or token store failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Writing output failed.
    #[error("failed to write output: {reason}")]
    Output {
        /// Underlying failure.
        reason: String,
    },

    /// No token file was given and the platform has no config directory.
    #[error("no location for the token file; pass --token-file")]
    NoTokenFile,
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Output { reason: err.to_string() }
    }
}
