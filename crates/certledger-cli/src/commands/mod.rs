//! Subcommand implementations.

use std::io::{self, Read};
use std::path::Path;

use anyhow::Context;
use certledger::store::{FileKeyStore, JsonLedger};
use certledger::{RawFields, Registry, RegistryConfig};

pub mod canonicalize;
pub mod issue;
pub mod keys;
pub mod list;
pub mod verify;
pub mod verify_hash;

type FileRegistry = Registry<JsonLedger, FileKeyStore>;

fn open_registry(data_dir: &Path) -> FileRegistry {
    Registry::open(RegistryConfig::in_dir(data_dir))
}

/// Read a file, or stdin when no path is given.
fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

/// Parse a JSON object of label to value, keeping label order.
fn parse_fields(text: &str) -> anyhow::Result<RawFields> {
    serde_json::from_str(text).context("Invalid fields JSON: expected an object of strings")
}

fn load_fields(path: &Path) -> anyhow::Result<RawFields> {
    parse_fields(&read_input(Some(path))?)
}
