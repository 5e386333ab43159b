//! # certledger testkit
//!
//! Testing utilities for certledger.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: raw field sets with their expected canonical payloads and digests
//! - **Generators**: Proptest strategies for label spellings, field order and digests
//! - **Fixtures**: a shared issuer keypair and in-memory registries
//!
//! ## Golden Vectors
//!
//! ```rust
//! use certledger_testkit::vectors::verify_all_vectors;
//!
//! for outcome in verify_all_vectors() {
//!     assert!(outcome.matches, "{}: {}", outcome.name, outcome.digest);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use certledger_testkit::generators::{raw_fields_for, CertificateParams};
//!
//! proptest! {
//!     #[test]
//!     fn digest_ignores_spelling(
//!         (a, b) in any::<CertificateParams>()
//!             .prop_flat_map(|p| (raw_fields_for(&p), raw_fields_for(&p)))
//!     ) {
//!         prop_assert_eq!(canonicalize(&a).digest, canonicalize(&b).digest);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust,no_run
//! use certledger_testkit::fixtures::{sample_certificate, TestFixture};
//!
//! let fixture = TestFixture::new();
//! let registry = fixture.registry();
//! registry.issue(sample_certificate()).unwrap();
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{
    full_certificate, sample_certificate, seed_key_files, shared_keypair, MemoryRegistry,
    TestFixture,
};
pub use generators::{raw_fields_for, CertificateParams};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector, VectorOutcome};
