//! Registry configuration.

use std::path::{Path, PathBuf};

/// Default file name of the issuer private key.
pub const PRIVATE_KEY_FILE: &str = "private_key.pem";
/// Default file name of the issuer public key.
pub const PUBLIC_KEY_FILE: &str = "public_key.pem";
/// Default file name of the issuance ledger.
pub const LEDGER_FILE: &str = "ledger.json";
/// University recorded when the certificate has no `university` field.
pub const UNKNOWN_UNIVERSITY: &str = "Unknown";

/// Where the registry keeps its state, and what it records by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Path of the PKCS#1 private key PEM.
    pub private_key_path: PathBuf,
    /// Path of the SubjectPublicKeyInfo public key PEM.
    pub public_key_path: PathBuf,
    /// Path of the JSON ledger.
    pub ledger_path: PathBuf,
    /// Fallback for [`LedgerEntry::university`](certledger_core::LedgerEntry).
    pub unknown_university: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            private_key_path: PathBuf::from(PRIVATE_KEY_FILE),
            public_key_path: PathBuf::from(PUBLIC_KEY_FILE),
            ledger_path: PathBuf::from(LEDGER_FILE),
            unknown_university: UNKNOWN_UNIVERSITY.to_string(),
        }
    }
}

impl RegistryConfig {
    /// Default file names, placed under `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            private_key_path: dir.join(PRIVATE_KEY_FILE),
            public_key_path: dir.join(PUBLIC_KEY_FILE),
            ledger_path: dir.join(LEDGER_FILE),
            ..Self::default()
        }
    }

    /// Override the fallback university name.
    pub fn with_unknown_university(mut self, name: impl Into<String>) -> Self {
        self.unknown_university = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_working_directory() {
        let config = RegistryConfig::default();
        assert_eq!(config.private_key_path, Path::new("private_key.pem"));
        assert_eq!(config.public_key_path, Path::new("public_key.pem"));
        assert_eq!(config.ledger_path, Path::new("ledger.json"));
        assert_eq!(config.unknown_university, "Unknown");
    }

    #[test]
    fn test_in_dir() {
        let config = RegistryConfig::in_dir("/var/lib/certledger").with_unknown_university("N/A");
        assert_eq!(
            config.ledger_path,
            Path::new("/var/lib/certledger/ledger.json")
        );
        assert_eq!(
            config.private_key_path,
            Path::new("/var/lib/certledger/private_key.pem")
        );
        assert_eq!(config.unknown_university, "N/A");
    }
}
