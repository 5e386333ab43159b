//! The Registry: issue and verify certificates against a signed ledger.
//!
//! Issuing canonicalizes the fields, hashes them, signs the digest and
//! appends an entry. Verifying recomputes the digest from the presented
//! fields, looks it up, and checks the stored signature with the issuer's
//! public key.

use std::sync::Arc;

use chrono::Utc;

use certledger_core::{
    canonicalize, verify, Canonicalized, Digest, FieldKey, KeyPair, LedgerEntry, RawFields,
};
use certledger_store::{FileKeyStore, JsonLedger, KeyStore, Ledger};

use crate::config::RegistryConfig;
use crate::error::Result;
use crate::result::{PipelineResult, Step, StepOutcome, Verdict};

pub const MSG_ISSUED: &str = "Certificate issued and added to ledger.";
pub const MSG_NOT_FOUND: &str = "Certificate hash not found in ledger.";
pub const MSG_VERIFIED: &str = "Certificate authentic. Signature verified.";
pub const MSG_BAD_SIGNATURE: &str = "Signature invalid. Certificate may be tampered.";

/// Certificate registry over an injected ledger and key store.
///
/// `Send + Sync` whenever its handles are, so one instance can serve
/// concurrent requests.
pub struct Registry<L: Ledger, K: KeyStore> {
    ledger: L,
    keys: K,
    config: RegistryConfig,
}

impl Registry<JsonLedger, FileKeyStore> {
    /// Open the file-backed registry described by `config`.
    ///
    /// Nothing is read or created until the first operation.
    pub fn open(config: RegistryConfig) -> Self {
        let ledger = JsonLedger::open(&config.ledger_path);
        let keys = FileKeyStore::new(&config.private_key_path, &config.public_key_path);
        Self::new(ledger, keys, config)
    }
}

impl<L: Ledger, K: KeyStore> Registry<L, K> {
    pub fn new(ledger: L, keys: K, config: RegistryConfig) -> Self {
        Self {
            ledger,
            keys,
            config,
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn keys(&self) -> &K {
        &self.keys
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Issuance
    // ─────────────────────────────────────────────────────────────────────────

    /// Sign `fields` and record them in the ledger.
    ///
    /// Generates the issuer keypair on first use. Issuing the same fields
    /// twice appends two entries.
    pub fn issue(&self, fields: RawFields) -> Result<PipelineResult> {
        let Canonicalized {
            record,
            payload,
            digest,
            degradations,
        } = canonicalize(&fields);

        let keypair = self.keys.ensure_keys()?;
        let signature = keypair.sign(&digest)?;

        let university = record
            .get(FieldKey::University)
            .unwrap_or(self.config.unknown_university.as_str())
            .to_string();
        let entry = LedgerEntry::new(university, digest, &signature, Utc::now());
        self.ledger.append(&entry)?;

        tracing::info!(hash = %digest, university = %entry.university, "certificate issued");

        let mut result = PipelineResult::new(fields, Some(payload), digest, degradations);
        result.record(Step::Issue, StepOutcome::Done);
        Ok(result.finish(Verdict::Issued, MSG_ISSUED))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Verification
    // ─────────────────────────────────────────────────────────────────────────

    /// Check presented `fields` against the ledger.
    ///
    /// Any edit to a field changes the digest, so an altered certificate
    /// fails at `hash_check`. A `Tampered` verdict is a normal result; only
    /// storage, key, or undecodable-signature failures are errors.
    pub fn verify(&self, fields: RawFields) -> Result<PipelineResult> {
        let Canonicalized {
            payload,
            digest,
            degradations,
            ..
        } = canonicalize(&fields);

        let result = PipelineResult::new(fields, Some(payload), digest, degradations);
        self.check(result)
    }

    /// Check a digest the caller already holds, skipping canonicalization.
    pub fn verify_digest(&self, digest: Digest) -> Result<PipelineResult> {
        let result = PipelineResult::new(RawFields::new(), None, digest, Vec::new());
        self.check(result)
    }

    fn check(&self, mut result: PipelineResult) -> Result<PipelineResult> {
        let digest = result.digest;

        let Some(entry) = self.ledger.find_by_hash(&digest)? else {
            result.record(Step::HashCheck, StepOutcome::Failed);
            tracing::warn!(hash = %digest, "hash not found in ledger");
            return Ok(result.finish(Verdict::Tampered, MSG_NOT_FOUND));
        };
        result.record(Step::HashCheck, StepOutcome::Done);
        tracing::debug!(hash = %digest, university = %entry.university, "hash found");

        let signature = entry.decode_signature()?;
        let public = self.keys.load_public()?;

        if verify(&digest, &signature, &public) {
            result.record(Step::SignatureVerification, StepOutcome::Done);
            tracing::debug!(hash = %digest, "signature verified");
            Ok(result.finish(Verdict::Verified, MSG_VERIFIED))
        } else {
            result.record(Step::SignatureVerification, StepOutcome::Failed);
            tracing::warn!(hash = %digest, "stored signature does not verify");
            Ok(result.finish(Verdict::Tampered, MSG_BAD_SIGNATURE))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read access
    // ─────────────────────────────────────────────────────────────────────────

    /// Canonical form and digest of `fields`, without touching keys or ledger.
    pub fn canonicalize(&self, fields: &RawFields) -> Canonicalized {
        canonicalize(fields)
    }

    /// Oldest ledger entry for `digest`.
    pub fn lookup(&self, digest: &Digest) -> Result<Option<LedgerEntry>> {
        Ok(self.ledger.find_by_hash(digest)?)
    }

    /// All ledger entries, oldest first.
    pub fn entries(&self) -> Result<Vec<LedgerEntry>> {
        Ok(self.ledger.entries()?)
    }

    /// Load the issuer keypair, generating and persisting it if absent.
    pub fn ensure_keys(&self) -> Result<Arc<KeyPair>> {
        Ok(self.keys.ensure_keys()?)
    }
}
