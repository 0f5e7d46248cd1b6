//! The crate's closed error taxonomy.
//!
//! Realized with `thiserror` at the library boundary (the CLI wraps these in
//! `anyhow`). `PartialMetadata` is deliberately *not* represented here: a
//! failed ABI parse is a non-fatal `Warn` step plus a reduced `ContractInfo`,
//! never a raised error.

use std::time::Duration;

/// Fatal errors surfaced by the verification pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input did not match the strict `^0x[0-9a-fA-F]{40}$` address shape;
    /// fails fast before any network call is attempted.
    #[error("invalid contract address: {0}")]
    InvalidAddress(String),

    /// A well-formed address whose deployed code is empty (`0x`).
    #[error("no contract deployed at address: {0}")]
    NoContractAtAddress(String),

    /// The node or explorer endpoint returned a failure status or an
    /// RPC-level error payload.
    #[error("network error: {0}")]
    Network(String),

    /// A bounded wait was exceeded.
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

impl Error {
    /// Whether a caller could reasonably retry after this error. Transport
    /// failures (`Network`, `Timeout`) are transient; a malformed address or
    /// an address with no code will not change on retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Network(_) | Error::Timeout(_))
    }
}

/// Convenience alias for results fallible with [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
