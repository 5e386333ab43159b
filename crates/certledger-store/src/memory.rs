//! In-memory implementations of the store traits.
//!
//! These are primarily for testing. They have the same semantics as the file
//! implementations but keep everything in memory with no persistence.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use certledger_core::{Digest, KeyPair, LedgerEntry, PrivateKey, PublicKey};

use crate::error::{KeyKind, Result, StoreError};
use crate::traits::{KeyStore, Ledger};

/// In-memory ledger. Thread-safe via RwLock.
#[derive(Default)]
pub struct MemoryLedger {
    entries: RwLock<Vec<LedgerEntry>>,
}

impl MemoryLedger {
    /// Create a new empty in-memory ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the stored signature hex of the oldest entry for `digest`.
    ///
    /// Simulates an edited ledger file. Returns whether an entry was found.
    pub fn replace_signature(&self, digest: &Digest, signature_hex: impl Into<String>) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        match entries.iter_mut().find(|e| e.hash == *digest) {
            Some(entry) => {
                entry.signature = signature_hex.into();
                true
            }
            None => false,
        }
    }
}

impl Ledger for MemoryLedger {
    fn append(&self, entry: &LedgerEntry) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.push(entry.clone());
        Ok(())
    }

    fn entries(&self) -> Result<Vec<LedgerEntry>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.clone())
    }

    fn find_by_hash(&self, digest: &Digest) -> Result<Option<LedgerEntry>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.iter().find(|e| e.hash == *digest).cloned())
    }

    fn len(&self) -> Result<usize> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.len())
    }
}

/// In-memory key store.
///
/// Starts empty unless seeded with [`with_keypair`](Self::with_keypair);
/// `ensure_keys` generates on first call like the file store does.
#[derive(Default)]
pub struct MemoryKeyStore {
    keypair: Mutex<Option<Arc<KeyPair>>>,
}

impl MemoryKeyStore {
    /// Create an empty key store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a key store that already holds `keypair`.
    pub fn with_keypair(keypair: KeyPair) -> Self {
        Self {
            keypair: Mutex::new(Some(Arc::new(keypair))),
        }
    }

    fn current(&self, kind: KeyKind) -> Result<Arc<KeyPair>> {
        let keypair = self.keypair.lock().unwrap_or_else(PoisonError::into_inner);
        keypair.clone().ok_or_else(|| StoreError::KeyMissing {
            kind,
            location: "memory".into(),
        })
    }
}

impl KeyStore for MemoryKeyStore {
    fn ensure_keys(&self) -> Result<Arc<KeyPair>> {
        let mut keypair = self.keypair.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = keypair.as_ref() {
            return Ok(Arc::clone(existing));
        }
        let generated = Arc::new(KeyPair::generate()?);
        *keypair = Some(Arc::clone(&generated));
        Ok(generated)
    }

    fn load_private(&self) -> Result<PrivateKey> {
        Ok(self.current(KeyKind::Private)?.private_key().clone())
    }

    fn load_public(&self) -> Result<PublicKey> {
        Ok(self.current(KeyKind::Public)?.public_key().clone())
    }
}
