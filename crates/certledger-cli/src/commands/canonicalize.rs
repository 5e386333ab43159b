//! Canonicalize command implementation.

use std::path::Path;

use certledger::core::canonicalize;
use serde_json::json;

use crate::output;

pub fn run(input: Option<&Path>, json: bool) -> anyhow::Result<i32> {
    let fields = super::parse_fields(&super::read_input(input)?)?;
    let canonical = canonicalize(&fields);

    if json {
        let value = json!({
            "canonical_payload": canonical.payload,
            "digest": canonical.digest,
            "degradations": canonical.degradations,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", canonical.payload.as_str());
        println!("{}", canonical.digest);
        for degradation in &canonical.degradations {
            eprintln!("warning: {}", degradation);
        }
    }
    Ok(output::EXIT_SUCCESS)
}
