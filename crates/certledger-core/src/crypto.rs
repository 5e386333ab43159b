//! Cryptographic primitives for certledger.
//!
//! Wraps RSASSA-PSS (SHA-256, MGF1-SHA-256, maximal salt) with strong types.
//! The signed message is the ASCII lowercase hex rendering of a [`Digest`],
//! not the raw digest bytes.

use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPrivateKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePublicKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::{Pss, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest as _, Sha256};
use std::fmt;
use std::ops::Deref;

use crate::error::CoreError;
use crate::types::Digest;

/// Modulus size for generated keys.
pub const KEY_BITS: usize = 2048;

/// SHA-256 output length in bytes.
const HASH_LEN: usize = 32;

/// Largest PSS salt the modulus allows: `emLen - hLen - 2`.
fn max_salt_len(modulus_bits: usize) -> usize {
    let em_len = (modulus_bits - 1).div_ceil(8);
    em_len.saturating_sub(HASH_LEN + 2)
}

/// SHA-256 of the hex-encoded digest, i.e. the hash PSS actually operates on.
fn message_hash(digest: &Digest) -> [u8; 32] {
    Sha256::digest(digest.to_hex().as_bytes()).into()
}

/// An RSA signature. Opaque bytes internally, hex on the wire.
#[derive(Clone, PartialEq, Eq)]
pub struct Signature(pub Vec<u8>);

impl Signature {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Decode the ledger's hex form.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        hex::decode(s.trim())
            .map(Self)
            .map_err(|e| CoreError::MalformedSignature(e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        write!(f, "Signature({}...)", &hex[..hex.len().min(16)])
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// The signing half of the issuer key.
#[derive(Clone)]
pub struct PrivateKey(RsaPrivateKey);

impl PrivateKey {
    /// Derive the matching public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(RsaPublicKey::from(&self.0))
    }

    pub fn bits(&self) -> usize {
        self.0.n().bits()
    }

    /// Encode as unencrypted PKCS#1 PEM (`BEGIN RSA PRIVATE KEY`).
    pub fn to_pem(&self) -> Result<impl Deref<Target = String>, CoreError> {
        self.0
            .to_pkcs1_pem(LineEnding::LF)
            .map_err(|e| CoreError::KeyEncoding(e.to_string()))
    }

    /// Decode PKCS#1 or PKCS#8 PEM.
    pub fn from_pem(pem: &str) -> Result<Self, CoreError> {
        RsaPrivateKey::from_pkcs1_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs8_pem(pem))
            .map(Self)
            .map_err(|e| CoreError::KeyEncoding(e.to_string()))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey(rsa-{})", self.bits())
    }
}

/// The verifying half of the issuer key.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey(RsaPublicKey);

impl PublicKey {
    pub fn bits(&self) -> usize {
        self.0.n().bits()
    }

    /// Encode as SubjectPublicKeyInfo PEM (`BEGIN PUBLIC KEY`).
    pub fn to_pem(&self) -> Result<String, CoreError> {
        self.0
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| CoreError::KeyEncoding(e.to_string()))
    }

    /// Decode SubjectPublicKeyInfo PEM, falling back to PKCS#1.
    pub fn from_pem(pem: &str) -> Result<Self, CoreError> {
        RsaPublicKey::from_public_key_pem(pem)
            .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
            .map(Self)
            .map_err(|e| CoreError::KeyEncoding(e.to_string()))
    }

    /// SHA-256 over the DER SubjectPublicKeyInfo, hex encoded.
    pub fn fingerprint(&self) -> Result<String, CoreError> {
        let der = self
            .0
            .to_public_key_der()
            .map_err(|e| CoreError::KeyEncoding(e.to_string()))?;
        Ok(hex::encode(Sha256::digest(der.as_bytes())))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey(rsa-{})", self.bits())
    }
}

/// The issuer keypair.
#[derive(Clone)]
pub struct KeyPair {
    private: PrivateKey,
    public: PublicKey,
}

impl KeyPair {
    /// Generate a fresh [`KEY_BITS`]-bit keypair.
    pub fn generate() -> Result<Self, CoreError> {
        Self::generate_with_bits(KEY_BITS)
    }

    /// Generate a keypair with an explicit modulus size.
    pub fn generate_with_bits(bits: usize) -> Result<Self, CoreError> {
        let mut rng = rand::thread_rng();
        let key = RsaPrivateKey::new(&mut rng, bits)
            .map_err(|e| CoreError::KeyGeneration(e.to_string()))?;
        Ok(Self::from_private(PrivateKey(key)))
    }

    pub fn from_private(private: PrivateKey) -> Self {
        let public = private.public_key();
        Self { private, public }
    }

    /// Pair a private key with a separately stored public key.
    ///
    /// Fails if the two halves do not belong together.
    pub fn from_parts(private: PrivateKey, public: PublicKey) -> Result<Self, CoreError> {
        if private.public_key() != public {
            return Err(CoreError::KeyEncoding(
                "public key does not match private key".into(),
            ));
        }
        Ok(Self { private, public })
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    pub fn sign(&self, digest: &Digest) -> Result<Signature, CoreError> {
        sign(digest, &self.private)
    }

    pub fn verify(&self, digest: &Digest, signature: &Signature) -> bool {
        verify(digest, signature, &self.public)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPair({:?})", self.public)
    }
}

/// Sign a digest. PSS is randomized: signing twice yields different bytes.
pub fn sign(digest: &Digest, key: &PrivateKey) -> Result<Signature, CoreError> {
    let hashed = message_hash(digest);
    let padding = Pss::new_with_salt::<Sha256>(max_salt_len(key.bits()));
    key.0
        .sign_with_rng(&mut rand::thread_rng(), padding, &hashed)
        .map(Signature)
        .map_err(|e| CoreError::Signing(e.to_string()))
}

/// Check a signature over a digest.
///
/// Any cryptographic failure, including a signature of the wrong length,
/// yields `false`.
pub fn verify(digest: &Digest, signature: &Signature, key: &PublicKey) -> bool {
    let hashed = message_hash(digest);
    let padding = Pss::new_with_salt::<Sha256>(max_salt_len(key.bits()));
    key.0.verify(padding, &hashed, &signature.0).is_ok()
}
