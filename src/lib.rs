//! Card Ledger Library
//! # Overview
//!
//! This library authenticates card holders via a salted, iterated password
//! hash and performs balance-affecting operations against an in-memory
//! account ledger, recording every mutation in an append-only transaction
//! log.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Credentials, TransactionRecord, errors)
//! - [`cli`] - CLI argument parsing and the interactive menu shim
//! - [`core`] - Business logic components:
//!   - [`core::credentials`] - PIN enrollment and verification (PBKDF2-HMAC-SHA256)
//!   - [`core::ledger`] - Balance mutations and their invariants
//!   - [`core::transaction_log`] - Append-only audit trail
//!   - [`core::shared`] - Coarse-grained mutex handle for concurrent callers
//! - [`io`] - Profile loading and CSV history output
//!
//! # Operations
//!
//! The ledger supports six balance-affecting or wallet operations:
//!
//! - **Deposit**: Credit funds to an account
//! - **Withdrawal**: Debit funds (requires sufficient balance)
//! - **Transfer**: Atomically debit one account and credit another
//! - **Receive**: Unilateral credit with no modeled counterpart debit
//! - **Create e-wallet**: Attach a zero-balance wallet, once per account
//! - **Receipt/history**: Read the append-only transaction log
//!
//! # Invariants
//!
//! - No account balance is ever negative after a committed operation
//! - A failed operation leaves all state unchanged
//! - Every committed mutation appends exactly one log record; transfers
//!   append a single record attributed to the sender
//! - The PIN is never stored; only a salt and a PBKDF2-derived key are

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use crate::core::{
    generate_card_number, CredentialStore, LedgerEngine, SharedLedger, TransactionLog,
};
pub use crate::io::{load_profiles, write_history_csv};
pub use crate::types::{
    Account, CardNumber, Credentials, LedgerError, TransactionKind, TransactionRecord, Wallet,
};
