//! Keys command implementation.

use std::path::Path;

use serde_json::json;

use crate::output;

pub fn run(data_dir: &Path, json: bool) -> anyhow::Result<i32> {
    let registry = super::open_registry(data_dir);
    let keypair = registry.ensure_keys()?;

    let config = registry.config();
    let public = keypair.public_key();
    let fingerprint = public.fingerprint()?;

    if json {
        let value = json!({
            "private_key": config.private_key_path.display().to_string(),
            "public_key": config.public_key_path.display().to_string(),
            "bits": public.bits(),
            "fingerprint": fingerprint,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{:<12} {}", "PRIVATE KEY", config.private_key_path.display());
        println!("{:<12} {}", "PUBLIC KEY", config.public_key_path.display());
        println!("{:<12} {}", "BITS", public.bits());
        println!("{:<12} {}", "FINGERPRINT", fingerprint);
    }
    Ok(output::EXIT_SUCCESS)
}
