//! JSON file implementation of the [`Ledger`] trait.
//!
//! The whole ledger is one JSON array, rewritten on every append. Appends are
//! serialized within the process; concurrent writers in different processes
//! are not supported and can lose entries.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use certledger_core::LedgerEntry;

use crate::error::{Result, StoreError};
use crate::fs::{write_atomic, Overwrite};
use crate::traits::Ledger;

/// Ledger persisted as a pretty-printed JSON array.
pub struct JsonLedger {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonLedger {
    /// Open a ledger at `path`. The file is created on first append.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<LedgerEntry>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes).map_err(|source| StoreError::LedgerCorrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, entries: &[LedgerEntry]) -> Result<()> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        entries
            .serialize(&mut ser)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        write_atomic(&self.path, &buf, Overwrite::Replace, false).map_err(|e| self.io_error(e))
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::LedgerIo {
            path: self.path.clone(),
            source,
        }
    }
}

impl Ledger for JsonLedger {
    fn append(&self, entry: &LedgerEntry) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut entries = self.read_all()?;
        entries.push(entry.clone());
        self.write_all(&entries)?;

        tracing::debug!(
            path = %self.path.display(),
            hash = %entry.hash,
            len = entries.len(),
            "appended ledger entry"
        );
        Ok(())
    }

    fn entries(&self) -> Result<Vec<LedgerEntry>> {
        self.read_all()
    }
}
