//! Error types for certledger core.

use thiserror::Error;

/// Core errors that can occur while hashing, signing or decoding.
///
/// A signature that fails cryptographic verification is deliberately absent:
/// that outcome is a verdict, not an error.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Signature bytes could not be decoded from their wire form.
    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    /// A digest string was not 32 bytes of hex.
    #[error("invalid digest: {0}")]
    InvalidDigest(String),

    /// Key material could not be encoded or decoded.
    #[error("key encoding error: {0}")]
    KeyEncoding(String),

    /// RSA key generation failed.
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    /// The signing operation itself failed.
    #[error("signing failed: {0}")]
    Signing(String),
}
