use clap::Parser;
use std::path::PathBuf;

/// Authenticate a card holder and run ledger operations from a text menu
#[derive(Parser, Debug)]
#[command(name = "card-ledger")]
#[command(about = "In-memory card ledger with PIN authentication", long_about = None)]
pub struct CliArgs {
    /// Profile CSV file with enrolled accounts (card,salt,key,balance)
    #[arg(value_name = "PROFILES", help = "Path to the enrolled-profiles CSV file")]
    pub profiles: PathBuf,

    /// Enroll a new card instead of starting a session
    #[arg(
        long = "enroll",
        help = "Generate a card number, derive credentials from a PIN, and append the profile"
    )]
    pub enroll: bool,

    /// Where to write the session's transaction history as CSV on exit
    #[arg(
        long = "history-csv",
        value_name = "PATH",
        help = "Write the transaction history as CSV to this file when the session ends"
    )]
    pub history_csv: Option<PathBuf>,
}
