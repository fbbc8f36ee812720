//! Core business logic module
//!
//! This module contains the core components:
//! - `credentials` - PIN enrollment and verification (PBKDF2-HMAC-SHA256)
//! - `ledger` - Balance mutations and their invariants
//! - `transaction_log` - Append-only audit trail
//! - `shared` - Coarse-grained mutex handle for concurrent callers

pub mod credentials;
pub mod ledger;
pub mod shared;
pub mod transaction_log;

pub use credentials::{generate_card_number, CredentialStore, PBKDF2_ITERATIONS};
pub use ledger::LedgerEngine;
pub use shared::SharedLedger;
pub use transaction_log::TransactionLog;
