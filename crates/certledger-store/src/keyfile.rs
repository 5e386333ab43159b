//! PEM file implementation of the [`KeyStore`] trait.
//!
//! Layout: the private key as unencrypted PKCS#1 PEM (mode 0600 on Unix),
//! the public key as SubjectPublicKeyInfo PEM.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use certledger_core::{KeyPair, PrivateKey, PublicKey};

use crate::error::{KeyKind, Result, StoreError};
use crate::fs::{write_atomic, Overwrite};
use crate::traits::KeyStore;

/// Keypair persisted as two PEM files.
///
/// The loaded pair is cached after the first successful `ensure_keys`, and
/// the generate-or-load path runs under a mutex so it executes at most once
/// per store.
pub struct FileKeyStore {
    private_path: PathBuf,
    public_path: PathBuf,
    cached: Mutex<Option<Arc<KeyPair>>>,
}

impl FileKeyStore {
    pub fn new(private_path: impl Into<PathBuf>, public_path: impl Into<PathBuf>) -> Self {
        Self {
            private_path: private_path.into(),
            public_path: public_path.into(),
            cached: Mutex::new(None),
        }
    }

    pub fn private_path(&self) -> &Path {
        &self.private_path
    }

    pub fn public_path(&self) -> &Path {
        &self.public_path
    }

    fn read_private(&self) -> Result<PrivateKey> {
        let pem = read_key_file(&self.private_path, KeyKind::Private)?;
        PrivateKey::from_pem(&pem).map_err(|e| corrupt(KeyKind::Private, &self.private_path, e))
    }

    fn read_public(&self) -> Result<PublicKey> {
        let pem = read_key_file(&self.public_path, KeyKind::Public)?;
        PublicKey::from_pem(&pem).map_err(|e| corrupt(KeyKind::Public, &self.public_path, e))
    }

    fn load_pair(&self) -> Result<KeyPair> {
        let private = self.read_private()?;
        let public = self.read_public()?;
        KeyPair::from_parts(private, public).map_err(|e| corrupt(KeyKind::Public, &self.public_path, e))
    }

    fn generate_pair(&self) -> Result<KeyPair> {
        let keypair = KeyPair::generate()?;
        let private_pem = keypair.private_key().to_pem()?;
        let public_pem = keypair.public_key().to_pem()?;

        write_atomic(&self.private_path, private_pem.as_bytes(), Overwrite::Never, true)?;
        write_atomic(&self.public_path, public_pem.as_bytes(), Overwrite::Never, false)?;

        tracing::info!(
            private = %self.private_path.display(),
            public = %self.public_path.display(),
            bits = keypair.public_key().bits(),
            "generated issuer keypair"
        );
        Ok(keypair)
    }
}

impl KeyStore for FileKeyStore {
    fn ensure_keys(&self) -> Result<Arc<KeyPair>> {
        let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(keypair) = cached.as_ref() {
            return Ok(Arc::clone(keypair));
        }

        let keypair = match (self.private_path.exists(), self.public_path.exists()) {
            (false, false) => self.generate_pair()?,
            (true, true) => self.load_pair()?,
            (true, false) => return Err(missing(KeyKind::Public, &self.public_path)),
            (false, true) => return Err(missing(KeyKind::Private, &self.private_path)),
        };

        let keypair = Arc::new(keypair);
        *cached = Some(Arc::clone(&keypair));
        Ok(keypair)
    }

    fn load_private(&self) -> Result<PrivateKey> {
        let cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);
        match cached.as_ref() {
            Some(keypair) => Ok(keypair.private_key().clone()),
            None => self.read_private(),
        }
    }

    fn load_public(&self) -> Result<PublicKey> {
        let cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);
        match cached.as_ref() {
            Some(keypair) => Ok(keypair.public_key().clone()),
            None => self.read_public(),
        }
    }
}

fn read_key_file(path: &Path, kind: KeyKind) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => missing(kind, path),
        _ => corrupt(kind, path, e),
    })
}

fn missing(kind: KeyKind, path: &Path) -> StoreError {
    StoreError::KeyMissing {
        kind,
        location: path.display().to_string(),
    }
}

fn corrupt(kind: KeyKind, path: &Path, reason: impl ToString) -> StoreError {
    StoreError::KeyCorrupt {
        kind,
        location: path.display().to_string(),
        reason: reason.to_string(),
    }
}
