//! Error types for the registry.

use certledger_core::CoreError;
use certledger_store::StoreError;
use thiserror::Error;

/// Fatal failures of an issue or verify run.
///
/// A tampered certificate is not an error: it comes back as a normal
/// [`PipelineResult`](crate::PipelineResult) with a `Tampered` verdict.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Hashing, signing or signature decoding failed.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Key or ledger persistence failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl RegistryError {
    /// Whether the failure concerns key material (missing, corrupt, or
    /// ungeneratable).
    pub fn is_key_error(&self) -> bool {
        matches!(
            self,
            RegistryError::Store(
                StoreError::KeyMissing { .. }
                    | StoreError::KeyCorrupt { .. }
                    | StoreError::KeyGeneration(_)
            ) | RegistryError::Core(CoreError::KeyEncoding(_) | CoreError::KeyGeneration(_))
        )
    }

    /// Whether the failure concerns the ledger file.
    pub fn is_ledger_error(&self) -> bool {
        matches!(
            self,
            RegistryError::Store(
                StoreError::LedgerIo { .. }
                    | StoreError::LedgerCorrupt { .. }
                    | StoreError::Serialization(_)
            )
        )
    }
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
