//! Verify-hash command implementation.

use std::path::Path;

use anyhow::Context;
use certledger::Digest;

use crate::output;

pub fn run(data_dir: &Path, hash: &str, json: bool) -> anyhow::Result<i32> {
    let digest = Digest::from_hex(hash).context("Invalid digest")?;
    let registry = super::open_registry(data_dir);

    let result = registry.verify_digest(digest)?;
    output::print_result(&result, json)?;
    Ok(output::exit_code(&result))
}
