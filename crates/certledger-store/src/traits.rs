//! Store traits: the abstract interfaces for key and ledger persistence.
//!
//! The pipeline only sees these traits, so tests can inject in-memory
//! implementations in place of the file-backed ones.

use std::sync::Arc;

use certledger_core::{Digest, KeyPair, LedgerEntry, PrivateKey, PublicKey};

use crate::error::Result;

/// Owner of the issuer keypair.
///
/// # Design Notes
///
/// - **Generate once**: `ensure_keys` creates key material only when none
///   exists. Once anything has been signed, a lost key must surface as
///   `KeyMissing`, never as a silently regenerated pair.
/// - **Idempotent**: calling `ensure_keys` again returns the same pair.
pub trait KeyStore: Send + Sync {
    /// Load the keypair, generating and persisting it on first use.
    fn ensure_keys(&self) -> Result<Arc<KeyPair>>;

    /// Load the signing key. Never generates.
    fn load_private(&self) -> Result<PrivateKey>;

    /// Load the verification key. Never generates.
    fn load_public(&self) -> Result<PublicKey>;
}

/// The append-only issuance ledger.
///
/// # Design Notes
///
/// - **Append-only**: entries are never mutated or removed.
/// - **Duplicates allowed**: the same digest may be appended twice; lookups
///   return the oldest match.
/// - **Writers serialize**: implementations must not interleave appends.
pub trait Ledger: Send + Sync {
    /// Add an entry at the end.
    fn append(&self, entry: &LedgerEntry) -> Result<()>;

    /// All entries, oldest first.
    fn entries(&self) -> Result<Vec<LedgerEntry>>;

    /// The oldest entry with the given digest.
    fn find_by_hash(&self, digest: &Digest) -> Result<Option<LedgerEntry>> {
        Ok(self.entries()?.into_iter().find(|e| e.hash == *digest))
    }

    /// Every entry with the given digest, oldest first.
    fn find_all_by_hash(&self, digest: &Digest) -> Result<Vec<LedgerEntry>> {
        Ok(self
            .entries()?
            .into_iter()
            .filter(|e| e.hash == *digest)
            .collect())
    }

    /// Number of entries.
    fn len(&self) -> Result<usize> {
        Ok(self.entries()?.len())
    }

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl<K: KeyStore + ?Sized> KeyStore for Arc<K> {
    fn ensure_keys(&self) -> Result<Arc<KeyPair>> {
        (**self).ensure_keys()
    }

    fn load_private(&self) -> Result<PrivateKey> {
        (**self).load_private()
    }

    fn load_public(&self) -> Result<PublicKey> {
        (**self).load_public()
    }
}

impl<L: Ledger + ?Sized> Ledger for Arc<L> {
    fn append(&self, entry: &LedgerEntry) -> Result<()> {
        (**self).append(entry)
    }

    fn entries(&self) -> Result<Vec<LedgerEntry>> {
        (**self).entries()
    }

    fn find_by_hash(&self, digest: &Digest) -> Result<Option<LedgerEntry>> {
        (**self).find_by_hash(digest)
    }

    fn find_all_by_hash(&self, digest: &Digest) -> Result<Vec<LedgerEntry>> {
        (**self).find_all_by_hash(digest)
    }

    fn len(&self) -> Result<usize> {
        (**self).len()
    }
}
