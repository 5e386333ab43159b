//! # certledger core
//!
//! Pure primitives for certificate issuance and verification: field
//! normalization, canonical payloads, SHA-256 digests and RSA-PSS signatures.
//!
//! This crate contains no file I/O. Key and ledger persistence live in
//! `certledger-store`.
//!
//! ## Key Types
//!
//! - [`RawFields`] - label → text pairs from field extraction
//! - [`FieldRecord`] - normalized fields keyed by canonical name
//! - [`CanonicalPayload`] - deterministic bytes of a record
//! - [`Digest`] - SHA-256 of a payload; the ledger key and signed message
//! - [`KeyPair`], [`PrivateKey`], [`PublicKey`], [`Signature`] - RSA-PSS
//! - [`LedgerEntry`] - the persisted record of one issuance
//!
//! ## Canonicalization
//!
//! Two field sets with the same normalized keys and values always produce the
//! same bytes. See the [`canonical`] module.

pub mod canonical;
pub mod crypto;
pub mod entry;
pub mod error;
pub mod fields;
pub mod types;

pub use canonical::{canonical_bytes, canonicalize, CanonicalPayload, Canonicalized};
pub use crypto::{sign, verify, KeyPair, PrivateKey, PublicKey, Signature, KEY_BITS};
pub use entry::{format_timestamp, LedgerEntry};
pub use error::CoreError;
pub use fields::{
    normalize_date, normalize_label, Degradation, FieldKey, FieldName, FieldRecord, RawFields,
};
pub use types::Digest;
