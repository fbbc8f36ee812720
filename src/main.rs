//! Card Ledger CLI
//!
//! Interactive menu front end for the in-memory card ledger.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- profiles.csv
//! cargo run -- --enroll profiles.csv
//! cargo run -- --history-csv history.csv profiles.csv
//! ```
//!
//! The program loads enrolled account profiles from the given CSV file,
//! prompts for a card number and PIN, and on successful authentication
//! presents the operation menu. With `--enroll` it instead generates a new
//! card, derives credentials from a PIN, and appends the profile row.
//!
//! Nothing is persisted across runs except the profile file; balances and
//! the transaction log live in memory only.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing profile file, unreadable input, write failure, etc.)

use card_ledger::cli;
use card_ledger::core::{CredentialStore, LedgerEngine, SharedLedger};
use card_ledger::io::{load_profiles, write_history_csv};
use std::fs::File;
use std::io::Write;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // Diagnostics go to stderr so they never interleave with prompts
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();
    let store = CredentialStore::new();

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    if args.enroll {
        if let Err(e) = cli::run_enrollment(&mut input, &mut output, &args.profiles, &store) {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
        return;
    }

    // Malformed profile rows are reported and skipped; a missing file is fatal.
    let accounts = match load_profiles(&args.profiles, |e| eprintln!("Profile error: {}", e)) {
        Ok(accounts) => accounts,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    tracing::debug!(count = accounts.len(), "profiles loaded");

    let ledger = SharedLedger::new(LedgerEngine::with_accounts(accounts));

    if let Err(e) = cli::run_session(&mut input, &mut output, &ledger, &store) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    if let Some(path) = args.history_csv {
        let result = File::create(&path)
            .map_err(|e| format!("Failed to create '{}': {}", path.display(), e))
            .and_then(|mut file| write_history_csv(&ledger.history(), &mut file));
        if let Err(e) = result {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }

    if let Err(e) = output.flush() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
