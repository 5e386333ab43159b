//! List command implementation.

use std::path::Path;

use crate::output;

pub fn run(data_dir: &Path, limit: Option<usize>, json: bool) -> anyhow::Result<i32> {
    let registry = super::open_registry(data_dir);
    let entries = registry.entries()?;
    let shown = entries.iter().take(limit.unwrap_or(usize::MAX));

    if json {
        for entry in shown {
            println!("{}", serde_json::to_string(entry)?);
        }
    } else {
        output::print_table_header();
        for entry in shown {
            println!("{}", output::format_table_row(entry));
        }
    }
    Ok(output::EXIT_SUCCESS)
}
