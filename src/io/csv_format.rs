//! CSV format handling for profile records and history output
//!
//! This module centralizes all CSV format concerns, providing:
//! - ProfileRecord structure for deserialization of enrolled accounts
//! - Conversion from profile records to domain types (hex decoding included)
//! - Serialization of accounts back to profile rows (for enrollment)
//! - Transaction history output serialization
//!
//! All functions are pure (no I/O) for easy testing. The hex encoding of
//! salt and derived key lives entirely at this boundary; the core only ever
//! sees decoded bytes.

use crate::types::{Account, Credentials, TransactionRecord};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for one enrolled account profile
///
/// Matches the profile file format with columns: card, salt, key, balance.
/// Salt and key are hex-encoded (32 and 64 characters respectively).
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ProfileRecord {
    pub card: String,
    pub salt: String,
    pub key: String,
    pub balance: String,
}

/// Convert a ProfileRecord to an Account
///
/// This function:
/// - Validates the card number is exactly 16 digits
/// - Decodes the hex-encoded salt and key into fixed-size byte arrays
/// - Parses the opening balance into a Decimal and rejects negative values
///
/// # Arguments
///
/// * `record` - The deserialized profile record
///
/// # Returns
///
/// Result containing either:
/// - Ok(Account) - Successfully converted profile
/// - Err(String) - Error message describing the conversion failure
pub fn convert_profile_record(record: ProfileRecord) -> Result<Account, String> {
    let card = record.card.trim();
    if card.len() != 16 || !card.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("Invalid card number '{}'", record.card));
    }

    let credentials = Credentials::from_hex(&record.salt, &record.key)
        .map_err(|e| format!("Card {}: {}", card, e))?;

    let balance = Decimal::from_str(record.balance.trim())
        .map_err(|_| format!("Invalid balance '{}' for card {}", record.balance, card))?;
    if balance < Decimal::ZERO {
        return Err(format!("Negative balance '{}' for card {}", balance, card));
    }

    Ok(Account::new(card.to_string(), credentials, balance))
}

/// Serialize an account as a profile row
///
/// Produces the fields in file order (card, salt, key, balance) with the
/// credential material hex-encoded, ready to be written by a csv::Writer.
pub fn profile_fields(account: &Account) -> [String; 4] {
    [
        account.card.clone(),
        account.credentials.salt_hex(),
        account.credentials.key_hex(),
        account.balance.to_string(),
    ]
}

/// Write transaction history to CSV format
///
/// Writes records in commit order with columns: timestamp, card, kind, amount.
/// Timestamps use RFC 3339 so the output round-trips through standard tools.
///
/// # Arguments
///
/// * `records` - Transaction records in commit order
/// * `output` - Mutable reference to a writer for outputting CSV
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_history_csv(
    records: &[TransactionRecord],
    output: &mut dyn Write,
) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["timestamp", "card", "kind", "amount"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for record in records {
        writer
            .write_record(&[
                record.timestamp.to_rfc3339(),
                record.card.clone(),
                record.kind.to_string(),
                format!("{:.2}", record.amount),
            ])
            .map_err(|e| format!("Failed to write history record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TransactionKind, KEY_LEN, SALT_LEN};
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn valid_record() -> ProfileRecord {
        ProfileRecord {
            card: "1234567890123456".to_string(),
            salt: "00".repeat(SALT_LEN),
            key: "00".repeat(KEY_LEN),
            balance: "10000.00".to_string(),
        }
    }

    #[test]
    fn test_convert_valid_profile_record() {
        let account = convert_profile_record(valid_record()).unwrap();

        assert_eq!(account.card, "1234567890123456");
        assert_eq!(account.balance, Decimal::new(1000000, 2));
        assert_eq!(account.credentials.salt, [0u8; SALT_LEN]);
        assert_eq!(account.credentials.key, [0u8; KEY_LEN]);
    }

    #[test]
    fn test_convert_trims_whitespace() {
        let mut record = valid_record();
        record.card = "  1234567890123456  ".to_string();
        record.balance = " 10000.00 ".to_string();

        let account = convert_profile_record(record).unwrap();
        assert_eq!(account.card, "1234567890123456");
        assert_eq!(account.balance, Decimal::new(1000000, 2));
    }

    #[rstest]
    #[case::short_card("12345", "Invalid card number")]
    #[case::non_numeric_card("12345678901234ab", "Invalid card number")]
    #[case::empty_card("", "Invalid card number")]
    fn test_convert_rejects_bad_card_numbers(#[case] card: &str, #[case] expected_error: &str) {
        let mut record = valid_record();
        record.card = card.to_string();

        let result = convert_profile_record(record);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains(expected_error));
    }

    #[rstest]
    #[case::bad_salt("zz", "Invalid salt encoding")]
    #[case::truncated_salt("0011", "Salt must be 16 bytes")]
    fn test_convert_rejects_bad_salt(#[case] salt: &str, #[case] expected_error: &str) {
        let mut record = valid_record();
        record.salt = salt.to_string();

        let result = convert_profile_record(record);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains(expected_error));
    }

    #[rstest]
    #[case::not_a_number("lots", "Invalid balance")]
    #[case::negative("-5.00", "Negative balance")]
    fn test_convert_rejects_bad_balances(#[case] balance: &str, #[case] expected_error: &str) {
        let mut record = valid_record();
        record.balance = balance.to_string();

        let result = convert_profile_record(record);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains(expected_error));
    }

    #[test]
    fn test_profile_fields_round_trip() {
        let account = convert_profile_record(valid_record()).unwrap();
        let fields = profile_fields(&account);

        let record = ProfileRecord {
            card: fields[0].clone(),
            salt: fields[1].clone(),
            key: fields[2].clone(),
            balance: fields[3].clone(),
        };
        assert_eq!(convert_profile_record(record).unwrap(), account);
    }

    #[test]
    fn test_write_history_csv() {
        let records = vec![
            TransactionRecord {
                timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
                card: "1234567890123456".to_string(),
                kind: TransactionKind::Deposit,
                amount: Decimal::new(50000, 2),
            },
            TransactionRecord {
                timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 5, 0).unwrap(),
                card: "1234567890123456".to_string(),
                kind: TransactionKind::SendMoney,
                amount: Decimal::new(50000, 2),
            },
        ];

        let mut output = Vec::new();
        write_history_csv(&records, &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert_eq!(
            output_str,
            "timestamp,card,kind,amount\n\
             2024-03-01T12:00:00+00:00,1234567890123456,Deposit,500.00\n\
             2024-03-01T12:05:00+00:00,1234567890123456,Send Money,500.00\n"
        );
    }

    #[test]
    fn test_write_history_csv_empty() {
        let mut output = Vec::new();
        write_history_csv(&[], &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert_eq!(output_str, "timestamp,card,kind,amount\n");
    }
}
