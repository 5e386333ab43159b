//! Test fixtures and helpers.
//!
//! Common setup code for registry tests.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use certledger::{Registry, RegistryConfig};
use certledger_core::{Digest, KeyPair, RawFields};
use certledger_store::{MemoryKeyStore, MemoryLedger};

/// A process-wide issuer keypair.
///
/// Generated once; RSA key generation dominates test time otherwise.
pub fn shared_keypair() -> &'static KeyPair {
    static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();
    KEYPAIR.get_or_init(|| KeyPair::generate().expect("RSA key generation failed"))
}

/// The certificate used across the end-to-end scenarios.
pub fn sample_certificate() -> RawFields {
    RawFields::new()
        .with("Name", "Jane Doe")
        .with("Enrollment No", "12345678901")
        .with("University", "X")
}

/// A full transcript-style certificate with every known field.
pub fn full_certificate() -> RawFields {
    RawFields::new()
        .with("University", "Gujarat Technological University")
        .with("Enrollment Number", "190280107001")
        .with("Name", "Asha Patel")
        .with("Program", "B.E.")
        .with("Specialization", "Computer Engineering")
        .with("Sem", "7")
        .with("Statement No", "A123456")
        .with("Date", "15 Jan 2024")
}

/// The registry type every fixture hands out.
pub type MemoryRegistry = Registry<Arc<MemoryLedger>, Arc<MemoryKeyStore>>;

/// An in-memory ledger and key store, seeded with [`shared_keypair`].
pub struct TestFixture {
    pub ledger: Arc<MemoryLedger>,
    pub keys: Arc<MemoryKeyStore>,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            ledger: Arc::new(MemoryLedger::new()),
            keys: Arc::new(MemoryKeyStore::with_keypair(shared_keypair().clone())),
        }
    }

    /// A registry over this fixture's stores. Registries from the same
    /// fixture share state.
    pub fn registry(&self) -> MemoryRegistry {
        Registry::new(
            Arc::clone(&self.ledger),
            Arc::clone(&self.keys),
            RegistryConfig::default(),
        )
    }

    /// Replace the stored signature for `digest` with a valid signature
    /// over a different digest.
    pub fn forge_signature(&self, digest: &Digest) -> bool {
        let other = Digest::of(&[digest.as_bytes().as_slice(), b"forged".as_slice()].concat());
        let forged = shared_keypair()
            .sign(&other)
            .expect("signing with the shared keypair failed");
        self.ledger.replace_signature(digest, forged.to_hex())
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Write [`shared_keypair`] into `dir` under the default key file names,
/// so a file-backed registry opened there skips key generation.
pub fn seed_key_files(dir: &Path) -> RegistryConfig {
    let config = RegistryConfig::in_dir(dir);
    let private_pem = shared_keypair()
        .private_key()
        .to_pem()
        .expect("private key encoding failed");
    let public_pem = shared_keypair()
        .public_key()
        .to_pem()
        .expect("public key encoding failed");
    std::fs::write(&config.private_key_path, private_pem.as_bytes())
        .expect("writing private key failed");
    std::fs::write(&config.public_key_path, public_pem).expect("writing public key failed");
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use certledger::{Step, StepOutcome, Verdict};
    use certledger_store::KeyStore;

    #[test]
    fn test_fixture_registries_share_state() {
        let fixture = TestFixture::new();
        let issued = fixture.registry().issue(sample_certificate()).unwrap();

        let result = fixture.registry().verify(sample_certificate()).unwrap();
        assert_eq!(result.final_verdict, Verdict::Verified);
        assert_eq!(result.digest, issued.digest);
    }

    #[test]
    fn test_forge_signature() {
        let fixture = TestFixture::new();
        let registry = fixture.registry();
        let issued = registry.issue(full_certificate()).unwrap();

        assert!(fixture.forge_signature(&issued.digest));
        let result = registry.verify(full_certificate()).unwrap();
        assert_eq!(
            result.step(Step::SignatureVerification),
            Some(StepOutcome::Failed)
        );
    }

    #[test]
    fn test_seed_key_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = seed_key_files(dir.path());

        let registry = Registry::open(config);
        let loaded = registry.keys().load_public().unwrap();
        assert_eq!(&loaded, shared_keypair().public_key());
    }
}
