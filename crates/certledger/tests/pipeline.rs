//! End-to-end issue/verify runs over the file-backed stores.

use std::path::Path;
use std::sync::OnceLock;

use certledger::core::KeyPair;
use certledger::store::{KeyStore, Ledger, StoreError};
use certledger::{
    RawFields, Registry, RegistryConfig, RegistryError, Step, StepOutcome, Verdict,
};
use tempfile::TempDir;

fn keypair() -> &'static KeyPair {
    static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();
    KEYPAIR.get_or_init(|| KeyPair::generate().unwrap())
}

/// A data directory that already holds the shared test keypair.
fn seeded_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    let config = RegistryConfig::in_dir(dir.path());
    let private_pem = keypair().private_key().to_pem().unwrap();
    std::fs::write(&config.private_key_path, private_pem.as_bytes()).unwrap();
    std::fs::write(
        &config.public_key_path,
        keypair().public_key().to_pem().unwrap(),
    )
    .unwrap();
    dir
}

fn open(dir: &Path) -> Registry<certledger::store::JsonLedger, certledger::store::FileKeyStore> {
    Registry::open(RegistryConfig::in_dir(dir))
}

fn certificate() -> RawFields {
    RawFields::new()
        .with("Name", "Jane Doe")
        .with("Enrollment No", "12345678901")
        .with("University", "X")
}

#[test]
fn test_issue_writes_ledger() {
    let dir = seeded_dir();
    let registry = open(dir.path());

    let result = registry.issue(certificate()).unwrap();
    assert_eq!(result.final_verdict, Verdict::Issued);
    assert_eq!(result.step(Step::Issue), Some(StepOutcome::Done));
    assert_eq!(result.message, "Certificate issued and added to ledger.");
    assert_eq!(
        result.digest.to_hex(),
        "7a57dedf7a75dd4321788fdbda71d1578a89e6b464aa6317a01128f372fc693c"
    );

    let text = std::fs::read_to_string(dir.path().join("ledger.json")).unwrap();
    let ledger: serde_json::Value = serde_json::from_str(&text).unwrap();
    let entries = ledger.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["university"], "X");
    assert_eq!(entries[0]["hash"], result.digest.to_hex());
    // 2048-bit signature, hex encoded.
    assert_eq!(entries[0]["signature"].as_str().unwrap().len(), 512);
}

#[test]
fn test_verify_untampered() {
    let dir = seeded_dir();
    open(dir.path()).issue(certificate()).unwrap();

    // A separate instance reads everything back from disk.
    let result = open(dir.path()).verify(certificate()).unwrap();
    assert_eq!(result.final_verdict, Verdict::Verified);
    assert_eq!(result.step(Step::HashCheck), Some(StepOutcome::Done));
    assert_eq!(
        result.step(Step::SignatureVerification),
        Some(StepOutcome::Done)
    );
    assert_eq!(result.message, "Certificate authentic. Signature verified.");
}

#[test]
fn test_verify_reordered_and_respelled_fields() {
    let dir = seeded_dir();
    let registry = open(dir.path());
    registry.issue(certificate()).unwrap();

    let presented = RawFields::new()
        .with("university", "X")
        .with("ENROLLMENT NUMBER", "12345678901")
        .with("Student Name", "Jane Doe");
    let result = registry.verify(presented).unwrap();
    assert_eq!(result.final_verdict, Verdict::Verified);
}

#[test]
fn test_verify_unknown_certificate() {
    let dir = seeded_dir();
    let result = open(dir.path()).verify(certificate()).unwrap();

    assert_eq!(result.final_verdict, Verdict::Tampered);
    assert_eq!(result.step(Step::HashCheck), Some(StepOutcome::Failed));
    assert_eq!(result.step(Step::SignatureVerification), None);
    assert!(result.message.contains("hash not found"));
}

#[test]
fn test_verify_edited_signature_in_file() {
    let dir = seeded_dir();
    open(dir.path()).issue(certificate()).unwrap();

    // Flip one hex digit of the stored signature, keeping it valid hex.
    let path = dir.path().join("ledger.json");
    let mut ledger: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let signature = ledger[0]["signature"].as_str().unwrap().to_string();
    let first = if signature.starts_with('0') { "1" } else { "0" };
    ledger[0]["signature"] = format!("{}{}", first, &signature[1..]).into();
    std::fs::write(&path, serde_json::to_string_pretty(&ledger).unwrap()).unwrap();

    let result = open(dir.path()).verify(certificate()).unwrap();
    assert_eq!(result.final_verdict, Verdict::Tampered);
    assert_eq!(result.step(Step::HashCheck), Some(StepOutcome::Done));
    assert_eq!(
        result.step(Step::SignatureVerification),
        Some(StepOutcome::Failed)
    );
    assert_eq!(result.message, "Signature invalid. Certificate may be tampered.");
}

#[test]
fn test_undecodable_signature_is_an_error() {
    let dir = seeded_dir();
    open(dir.path()).issue(certificate()).unwrap();

    let path = dir.path().join("ledger.json");
    let mut ledger: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    ledger[0]["signature"] = "zz".into();
    std::fs::write(&path, serde_json::to_string(&ledger).unwrap()).unwrap();

    let err = open(dir.path()).verify(certificate()).unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Core(certledger::core::CoreError::MalformedSignature(_))
    ));
}

#[test]
fn test_missing_public_key_is_an_error() {
    let dir = seeded_dir();
    open(dir.path()).issue(certificate()).unwrap();
    std::fs::remove_file(dir.path().join("public_key.pem")).unwrap();

    let err = open(dir.path()).verify(certificate()).unwrap_err();
    assert!(err.is_key_error());
    assert!(matches!(
        err,
        RegistryError::Store(StoreError::KeyMissing { .. })
    ));
}

#[test]
fn test_keys_generated_once() {
    let dir = TempDir::new().unwrap();
    let registry = open(dir.path());

    let first = registry.ensure_keys().unwrap();
    let private = std::fs::read(dir.path().join("private_key.pem")).unwrap();
    let public = std::fs::read(dir.path().join("public_key.pem")).unwrap();

    // Same instance, then a fresh one over the same directory.
    let second = registry.ensure_keys().unwrap();
    let third = open(dir.path()).ensure_keys().unwrap();
    assert_eq!(first.public_key(), second.public_key());
    assert_eq!(first.public_key(), third.public_key());

    assert_eq!(std::fs::read(dir.path().join("private_key.pem")).unwrap(), private);
    assert_eq!(std::fs::read(dir.path().join("public_key.pem")).unwrap(), public);
}

#[test]
fn test_first_issue_generates_keys() {
    let dir = TempDir::new().unwrap();
    let registry = open(dir.path());
    assert!(!dir.path().join("private_key.pem").exists());

    registry.issue(certificate()).unwrap();
    assert!(dir.path().join("private_key.pem").exists());
    assert!(dir.path().join("public_key.pem").exists());

    let result = open(dir.path()).verify(certificate()).unwrap();
    assert_eq!(result.final_verdict, Verdict::Verified);
}

#[test]
fn test_ledger_is_append_only() {
    let dir = seeded_dir();
    let registry = open(dir.path());

    let digests: Vec<_> = (0..10)
        .map(|n| {
            let fields = certificate().with("Statement No", format!("S{}", n));
            registry.issue(fields).unwrap().digest
        })
        .collect();

    let entries = registry.entries().unwrap();
    assert_eq!(entries.len(), 10);
    for (entry, digest) in entries.iter().zip(&digests) {
        assert_eq!(&entry.hash, digest);
    }
    for digest in &digests {
        let result = registry.verify_digest(*digest).unwrap();
        assert_eq!(result.final_verdict, Verdict::Verified);
    }
}

#[test]
fn test_duplicate_issuance_keeps_both() {
    let dir = seeded_dir();
    let registry = open(dir.path());

    let a = registry.issue(certificate()).unwrap();
    let b = registry.issue(certificate()).unwrap();
    assert_eq!(a.digest, b.digest);

    assert_eq!(registry.ledger().find_all_by_hash(&a.digest).unwrap().len(), 2);
    assert_eq!(
        registry.verify(certificate()).unwrap().final_verdict,
        Verdict::Verified
    );
}

#[test]
fn test_lookup_and_fallback_university() {
    let dir = seeded_dir();
    let registry = Registry::open(
        RegistryConfig::in_dir(dir.path()).with_unknown_university("Unlisted"),
    );

    let issued = registry
        .issue(RawFields::new().with("Name", "No University"))
        .unwrap();
    let entry = registry.lookup(&issued.digest).unwrap().unwrap();
    assert_eq!(entry.university, "Unlisted");
    assert!(entry.issued_at().is_some());
    assert!(registry.keys().load_public().is_ok());
}

#[test]
fn test_degraded_date_is_reported() {
    let dir = seeded_dir();
    let registry = open(dir.path());

    let fields = certificate().with("Date", "sometime in 2024");
    let issued = registry.issue(fields.clone()).unwrap();
    assert_eq!(issued.degradations.len(), 1);
    assert_eq!(issued.degradations[0].value, "sometime in 2024");

    let verified = registry.verify(fields).unwrap();
    assert_eq!(verified.final_verdict, Verdict::Verified);
}
