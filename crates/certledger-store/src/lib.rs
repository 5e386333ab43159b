//! # certledger store
//!
//! Persistence for certledger: the issuer keypair and the append-only
//! issuance ledger, each behind a trait with a file-backed and an in-memory
//! implementation.
//!
//! ## Key Types
//!
//! - [`KeyStore`] - generate-once keypair ownership
//! - [`FileKeyStore`] - PEM files on disk
//! - [`Ledger`] - append-only entry log with lookup by digest
//! - [`JsonLedger`] - a single JSON array file, atomically rewritten
//! - [`MemoryLedger`], [`MemoryKeyStore`] - in-memory stand-ins for tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use certledger_store::{FileKeyStore, JsonLedger, KeyStore, Ledger};
//!
//! let keys = FileKeyStore::new("private_key.pem", "public_key.pem");
//! let keypair = keys.ensure_keys().unwrap();
//!
//! let ledger = JsonLedger::open("ledger.json");
//! println!("{} entries, key {:?}", ledger.len().unwrap(), keypair);
//! ```
//!
//! ## Design Notes
//!
//! - **Atomic rewrites**: files are written to a temp file and renamed.
//! - **Keys are never overwritten**: key files are created with no-clobber
//!   semantics, and a half-present pair is an error rather than a reason to
//!   regenerate.
//! - **Single writer**: appends serialize within a process only.

pub mod error;
mod fs;
pub mod json;
pub mod keyfile;
pub mod memory;
pub mod traits;

pub use error::{KeyKind, Result, StoreError};
pub use json::JsonLedger;
pub use keyfile::FileKeyStore;
pub use memory::{MemoryKeyStore, MemoryLedger};
pub use traits::{KeyStore, Ledger};
