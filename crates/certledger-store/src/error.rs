//! Error types for the store module.

use std::fmt;
use std::path::PathBuf;

use certledger_core::CoreError;
use thiserror::Error;

/// Which half of the keypair an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Private,
    Public,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyKind::Private => f.write_str("private key"),
            KeyKind::Public => f.write_str("public key"),
        }
    }
}

/// Errors that can occur during store operations.
///
/// All of these are fatal for the operation that raised them.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A key artifact is absent. Never answered by regenerating.
    #[error("{kind} missing at {location}")]
    KeyMissing { kind: KeyKind, location: String },

    /// A key artifact exists but cannot be read or parsed.
    #[error("{kind} at {location} is corrupt: {reason}")]
    KeyCorrupt {
        kind: KeyKind,
        location: String,
        reason: String,
    },

    /// Generating or encoding fresh key material failed.
    #[error("key generation failed: {0}")]
    KeyGeneration(#[from] CoreError),

    /// The ledger file could not be read or written.
    #[error("ledger I/O error at {}: {source}", path.display())]
    LedgerIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The ledger file exists but is not a valid entry array.
    #[error("ledger at {} is corrupt: {source}", path.display())]
    LedgerCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Entry serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
