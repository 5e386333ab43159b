//! Verify command implementation.

use std::path::Path;

use crate::output;

pub fn run(data_dir: &Path, fields: &Path, json: bool) -> anyhow::Result<i32> {
    let fields = super::load_fields(fields)?;
    let registry = super::open_registry(data_dir);

    let result = registry.verify(fields)?;
    output::print_result(&result, json)?;
    Ok(output::exit_code(&result))
}
