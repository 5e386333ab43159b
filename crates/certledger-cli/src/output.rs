//! Output formatting utilities.

use certledger::{LedgerEntry, PipelineResult, Verdict};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_TAMPERED: i32 = 2;

/// Exit code for a finished run.
pub fn exit_code(result: &PipelineResult) -> i32 {
    match result.final_verdict {
        Verdict::Tampered => EXIT_TAMPERED,
        Verdict::Issued | Verdict::Verified => EXIT_SUCCESS,
    }
}

/// Print a pipeline result as pretty JSON or as labelled lines.
pub fn print_result(result: &PipelineResult, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!("{:<10} {}", "VERDICT", result.final_verdict);
    println!("{:<10} {}", "MESSAGE", result.message);
    println!("{:<10} {}", "DIGEST", result.digest);
    if let Some(payload) = &result.canonical_payload {
        println!("{:<10} {}", "PAYLOAD", payload.as_str());
    }
    for (step, outcome) in &result.steps {
        println!("{:<10} {:<24} {}", "STEP", step.as_str(), outcome);
    }
    for degradation in &result.degradations {
        println!("{:<10} {}", "DEGRADED", degradation);
    }
    Ok(())
}

/// Formats a ledger entry as a table row.
pub fn format_table_row(entry: &LedgerEntry) -> String {
    format!(
        "{:<64} {:<32} {}",
        entry.hash,
        truncate(&entry.university, 32),
        entry.timestamp
    )
}

/// Prints table header.
#[allow(clippy::print_literal)]
pub fn print_table_header() {
    println!("{:<64} {:<32} {}", "HASH", "UNIVERSITY", "TIMESTAMP");
    println!("{}", "-".repeat(128));
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
