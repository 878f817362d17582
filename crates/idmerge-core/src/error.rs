//! Errors raised around the merger: loading, rendering, configuration.
//!
//! The merge itself is total and never fails.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// The account source could not be opened or read.
    #[error("failed to read the accounts: {0}")]
    Read(io::Error),
    /// The content is not a list of account records.
    #[error("failed to unmarshal accounts: {0}")]
    Decode(serde_json::Error),
    #[error("failed to marshal accounts: {0}")]
    Encode(serde_json::Error),
    #[error("failed to write the people: {0}")]
    Write(io::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
}
