//! # certledger
//!
//! Tamper-evident certificate registry. An issuer signs the canonical form
//! of a certificate's fields and records the digest in an append-only
//! ledger; a verifier recomputes the digest from presented fields and checks
//! the recorded signature.
//!
//! ## Overview
//!
//! - **Issue**: canonicalize → SHA-256 → RSA-PSS sign → append to ledger
//! - **Verify**: canonicalize → SHA-256 → ledger lookup → signature check
//!
//! Every run ends in exactly one [`Verdict`]: `Issued`, `Verified`, or
//! `Tampered`. Tampering is a result, not an error.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use certledger::{RawFields, Registry, RegistryConfig, Verdict};
//!
//! let registry = Registry::open(RegistryConfig::in_dir("/var/lib/certledger"));
//!
//! let fields = RawFields::new()
//!     .with("Name", "Jane Doe")
//!     .with("Enrollment No", "12345678901")
//!     .with("University", "X");
//!
//! let issued = registry.issue(fields.clone()).unwrap();
//! assert_eq!(issued.final_verdict, Verdict::Issued);
//!
//! let checked = registry.verify(fields).unwrap();
//! assert_eq!(checked.final_verdict, Verdict::Verified);
//! ```
//!
//! ## Re-exports
//!
//! - `certledger::core` - canonicalization, digests, keys and signatures
//! - `certledger::store` - key store and ledger traits and implementations

pub mod config;
pub mod error;
pub mod registry;
pub mod result;

pub use certledger_core as core;
pub use certledger_store as store;

pub use config::RegistryConfig;
pub use error::{RegistryError, Result};
pub use registry::Registry;
pub use result::{PipelineResult, Step, StepOutcome, Verdict};

// Types callers need for every run.
pub use certledger_core::{Digest, LedgerEntry, RawFields};
