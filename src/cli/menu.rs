//! Interactive menu session
//!
//! The thin I/O shim around the core: prompts for a card number and PIN,
//! authenticates, then dispatches menu choices to the shared ledger and
//! renders typed results as user-facing text. All console I/O lives here;
//! the core performs none.
//!
//! Input and output are generic so the whole session can be driven from a
//! test with a scripted reader and an in-memory writer.

use crate::core::{generate_card_number, CredentialStore, SharedLedger};
use crate::io::append_profile;
use crate::types::Account;
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use std::path::Path;
use std::str::FromStr;

/// Run one authenticated menu session
///
/// Prompts for a card number and PIN, verifies the PIN outside the ledger
/// lock, and on success loops over the menu until the user exits. An
/// authentication failure ends the session with a single generic message.
///
/// # Arguments
///
/// * `input` - Line-oriented user input
/// * `output` - Destination for prompts and results
/// * `ledger` - The shared ledger handle
/// * `store` - Credential store used for PIN verification
///
/// # Returns
///
/// * `Ok(())` when the session ends (exit choice, EOF, or failed login)
/// * `Err(String)` on an I/O failure writing to `output`
pub fn run_session(
    input: &mut impl BufRead,
    output: &mut impl Write,
    ledger: &SharedLedger,
    store: &CredentialStore,
) -> Result<(), String> {
    let card = prompt(input, output, "Enter card number: ")?;
    let pin = prompt(input, output, "Enter PIN: ")?;

    // Fetch under a short lock, derive outside it.
    let credentials = ledger.credentials(&card);
    if let Err(e) = store.authenticate(&pin, credentials.as_ref()) {
        tracing::warn!("login rejected");
        writeln(output, &format!("{}.", e))?;
        return Ok(());
    }
    tracing::debug!(%card, "session started");

    loop {
        print_menu(output)?;
        let choice = prompt(input, output, "Enter your choice (0-9): ")?;

        match choice.as_str() {
            "1" => match ledger.check_balance(&card) {
                Ok(balance) => writeln(output, &format!("Your balance: ${}", balance))?,
                Err(e) => writeln(output, &format!("{}.", e))?,
            },
            "2" => {
                if let Some(amount) = read_amount(input, output, "Enter the deposit amount: $")? {
                    match ledger.deposit(&card, amount) {
                        Ok(balance) => writeln(
                            output,
                            &format!("Deposited ${}. New balance: ${}", amount, balance),
                        )?,
                        Err(e) => writeln(output, &format!("{}.", e))?,
                    }
                }
            }
            "3" => {
                if let Some(amount) =
                    read_amount(input, output, "Enter the withdrawal amount: $")?
                {
                    match ledger.withdraw(&card, amount) {
                        Ok(balance) => writeln(
                            output,
                            &format!("Withdrew ${}. New balance: ${}", amount, balance),
                        )?,
                        Err(e) => writeln(output, &format!("{}.", e))?,
                    }
                }
            }
            "4" => {
                let recipient = prompt(input, output, "Enter recipient card number: ")?;
                if let Some(amount) = read_amount(input, output, "Enter the amount to send: $")? {
                    match ledger.transfer(&card, &recipient, amount) {
                        Ok(_) => writeln(
                            output,
                            &format!("Sent ${} from {} to {}.", amount, card, recipient),
                        )?,
                        Err(e) => writeln(output, &format!("{}.", e))?,
                    }
                }
            }
            "5" => {
                if let Some(amount) =
                    read_amount(input, output, "Enter the amount to receive: $")?
                {
                    match ledger.receive(&card, amount) {
                        Ok(balance) => writeln(
                            output,
                            &format!("Received ${}. New balance: ${}", amount, balance),
                        )?,
                        Err(e) => writeln(output, &format!("{}.", e))?,
                    }
                }
            }
            "6" => match ledger.latest_receipt() {
                Ok(receipt) => {
                    writeln(output, &format!("Receipt for {}:", receipt.card))?;
                    writeln(output, &format!("Date: {}", receipt.timestamp))?;
                    writeln(output, &format!("Transaction Type: {}", receipt.kind))?;
                    writeln(output, &format!("Amount: ${}", receipt.amount))?;
                }
                Err(e) => writeln(output, &format!("{}.", e))?,
            },
            "7" => match ledger.create_wallet(&card) {
                Ok(()) => writeln(output, &format!("E-Wallet created for {}.", card))?,
                Err(e) => writeln(output, &format!("{}.", e))?,
            },
            "8" => match ledger.wallet_balance(&card) {
                Ok(balance) => {
                    writeln(output, &format!("E-Wallet balance for {}: ${}", card, balance))?
                }
                Err(e) => writeln(output, &format!("{}.", e))?,
            },
            "9" => {
                writeln(output, "\n===== Transaction History =====")?;
                for record in ledger.history() {
                    writeln(
                        output,
                        &format!(
                            "{} - Card: {}, {}: ${}",
                            record.timestamp, record.card, record.kind, record.amount
                        ),
                    )?;
                }
            }
            // An empty line means end of input; say goodbye either way.
            "0" | "" => {
                writeln(output, "Exiting. Thank you!")?;
                break;
            }
            _ => writeln(output, "Invalid choice. Please try again.")?,
        }
    }

    Ok(())
}

/// Enroll a new card and append its profile row
///
/// Generates a 16-digit card number from the OS CSPRNG, prompts for a PIN,
/// derives credentials, and persists the profile with a zero opening
/// balance. Prints the new card number so it can be handed to the holder.
///
/// # Returns
///
/// * `Ok(())` when the profile row was written
/// * `Err(String)` on I/O failure or if the profile could not be persisted
pub fn run_enrollment(
    input: &mut impl BufRead,
    output: &mut impl Write,
    profiles_path: &Path,
    store: &CredentialStore,
) -> Result<(), String> {
    let pin = prompt(input, output, "Enter PIN for the new card: ")?;
    if pin.is_empty() {
        return Err("PIN must not be empty".to_string());
    }

    let card = generate_card_number();
    let credentials = store.enroll(&pin);
    let account = Account::new(card.clone(), credentials, Decimal::ZERO);

    append_profile(profiles_path, &account)?;
    tracing::debug!(%card, "card enrolled");

    writeln(output, &format!("Enrolled new card: {}", card))?;
    Ok(())
}

fn print_menu(output: &mut impl Write) -> Result<(), String> {
    writeln(output, "\n===== ATM Menu =====")?;
    writeln(output, "1. Check Balance")?;
    writeln(output, "2. Deposit")?;
    writeln(output, "3. Withdraw")?;
    writeln(output, "4. Send Money")?;
    writeln(output, "5. Receive Money")?;
    writeln(output, "6. Generate Receipt")?;
    writeln(output, "7. Create E-Wallet")?;
    writeln(output, "8. E-Wallet Balance")?;
    writeln(output, "9. Transaction History")?;
    writeln(output, "0. Exit")?;
    Ok(())
}

/// Print a prompt and read one trimmed line; empty string on EOF
fn prompt(
    input: &mut impl BufRead,
    output: &mut impl Write,
    text: &str,
) -> Result<String, String> {
    write!(output, "{}", text).map_err(|e| format!("Failed to write output: {}", e))?;
    output
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| format!("Failed to read input: {}", e))?;
    Ok(line.trim().to_string())
}

/// Prompt for an amount; `None` (with a message) if it does not parse
///
/// Sign and range checks stay in the core; this only handles text that is
/// not a number at all.
fn read_amount(
    input: &mut impl BufRead,
    output: &mut impl Write,
    text: &str,
) -> Result<Option<Decimal>, String> {
    let raw = prompt(input, output, text)?;
    match Decimal::from_str(&raw) {
        Ok(amount) => Ok(Some(amount)),
        Err(_) => {
            writeln(output, &format!("Invalid amount '{}'.", raw))?;
            Ok(None)
        }
    }
}

fn writeln(output: &mut impl Write, line: &str) -> Result<(), String> {
    std::io::Write::write_fmt(output, format_args!("{}\n", line))
        .map_err(|e| format!("Failed to write output: {}", e))
}
