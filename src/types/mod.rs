//! Core data types for the card ledger
//!
//! This module contains:
//! - Account and credential types (`account`)
//! - Transaction types (`transaction`)
//! - Error types (`error`)

pub mod account;
pub mod error;
pub mod transaction;

pub use account::{Account, CardNumber, Credentials, Wallet, KEY_LEN, SALT_LEN};
pub use error::LedgerError;
pub use transaction::{TransactionKind, TransactionRecord};
