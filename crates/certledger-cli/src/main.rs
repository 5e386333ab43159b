//! certledger CLI - issue and verify certificates against a local ledger.
//!
//! Commands:
//! - certledger keys - Create or show the issuer keypair
//! - certledger issue <fields.json> - Sign fields and append them to the ledger
//! - certledger verify <fields.json> - Check fields against the ledger
//! - certledger verify-hash <hex> - Check a digest against the ledger
//! - certledger canonicalize [fields.json] - Show canonical payload and digest
//! - certledger list - List ledger entries
//!
//! Exit codes: 0 on success, 2 when the verdict is `Tampered`, 1 on any error.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{canonicalize, issue, keys, list, verify, verify_hash};

#[derive(Parser)]
#[command(name = "certledger")]
#[command(about = "Tamper-evident certificate issuance and verification", long_about = None)]
struct Cli {
    /// Directory holding the keys and the ledger
    #[arg(long, global = true, default_value = ".")]
    data_dir: PathBuf,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbosity level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the issuer keypair if absent and show its fingerprint
    Keys,
    /// Sign a certificate's fields and append them to the ledger
    Issue {
        /// JSON object of field label to value
        fields: PathBuf,
    },
    /// Verify a certificate's fields against the ledger
    Verify {
        /// JSON object of field label to value
        fields: PathBuf,
    },
    /// Verify a previously computed digest against the ledger
    VerifyHash {
        /// SHA-256 digest, 64 hex characters
        hash: String,
    },
    /// Show the canonical payload and digest for fields
    Canonicalize {
        /// Input JSON file (or stdin if not provided)
        input: Option<PathBuf>,
    },
    /// List ledger entries, oldest first
    List {
        /// Show at most N entries
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let data_dir = cli.data_dir;
    let json = cli.json;

    let result = match cli.command {
        Commands::Keys => keys::run(&data_dir, json),
        Commands::Issue { fields } => issue::run(&data_dir, &fields, json),
        Commands::Verify { fields } => verify::run(&data_dir, &fields, json),
        Commands::VerifyHash { hash } => verify_hash::run(&data_dir, &hash, json),
        Commands::Canonicalize { input } => canonicalize::run(input.as_deref(), json),
        Commands::List { limit } => list::run(&data_dir, limit, json),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(output::EXIT_FAILURE);
        }
    }
}
