//! Error types for the card ledger
//!
//! This module defines all error kinds the core can report. Errors are
//! typed results handed back to the surrounding CLI layer, which translates
//! them into user-facing text; none of them are fatal to the process and the
//! core never retries on its own.
//!
//! Authentication failure is deliberately a single undifferentiated variant:
//! an unknown card and a wrong PIN must be indistinguishable to the caller
//! so that account numbers cannot be enumerated.

use crate::types::account::CardNumber;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for ledger and credential operations
///
/// Every variant is recoverable: the failed operation leaves ledger state
/// byte-for-byte unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Authentication failed
    ///
    /// Covers both unknown card number and wrong PIN. The two cases are
    /// intentionally not distinguishable through this error, its message,
    /// or derivation timing.
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// No account enrolled under the given card number
    #[error("Account {card} not found")]
    AccountNotFound {
        /// Card number that was not found
        card: CardNumber,
    },

    /// Amount is not strictly positive
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// Balance is too low for the requested debit
    #[error("Insufficient funds for {card}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Card number of the debited account
        card: CardNumber,
        /// Current balance
        balance: Decimal,
        /// Requested debit amount
        requested: Decimal,
    },

    /// Sender and recipient of a transfer are the same account
    ///
    /// Self-transfers are rejected rather than treated as a no-op so the
    /// log never carries a spurious record.
    #[error("Cannot transfer from {card} to itself")]
    SameAccount {
        /// The card number given as both sender and recipient
        card: CardNumber,
    },

    /// The account already has an e-wallet
    #[error("E-wallet already exists for {card}")]
    WalletAlreadyExists {
        /// Card number of the owning account
        card: CardNumber,
    },

    /// The account has no e-wallet
    #[error("E-wallet not found for {card}")]
    WalletNotFound {
        /// Card number of the owning account
        card: CardNumber,
    },

    /// The transaction log is empty
    #[error("No transactions to generate a receipt")]
    NoTransactions,

    /// Balance arithmetic would overflow
    ///
    /// The operation is rejected to keep account state intact.
    #[error("Arithmetic overflow in {operation} for {card}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Card number of the affected account
        card: CardNumber,
    },
}

// Helper constructors for errors carrying context

impl LedgerError {
    /// Create an AccountNotFound error
    pub fn account_not_found(card: &str) -> Self {
        LedgerError::AccountNotFound {
            card: card.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        LedgerError::InvalidAmount { amount }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(card: &str, balance: Decimal, requested: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            card: card.to_string(),
            balance,
            requested,
        }
    }

    /// Create a SameAccount error
    pub fn same_account(card: &str) -> Self {
        LedgerError::SameAccount {
            card: card.to_string(),
        }
    }

    /// Create a WalletAlreadyExists error
    pub fn wallet_already_exists(card: &str) -> Self {
        LedgerError::WalletAlreadyExists {
            card: card.to_string(),
        }
    }

    /// Create a WalletNotFound error
    pub fn wallet_not_found(card: &str) -> Self {
        LedgerError::WalletNotFound {
            card: card.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, card: &str) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            card: card.to_string(),
        }
    }
}
