//! Transaction-related types for the card ledger
//!
//! This module defines the transaction kinds recorded by the ledger and the
//! immutable record appended to the transaction log on every committed
//! mutation.

use super::account::CardNumber;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of balance-affecting operations recorded in the log
///
/// Each variant corresponds to one committed ledger mutation. Transfers
/// produce a single `SendMoney` record attributed to the sender;
/// `ReceiveMoney` is a standalone unilateral credit with no counterpart
/// debit modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Credit funds to an account
    Deposit,

    /// Debit funds from an account
    ///
    /// Requires sufficient balance to succeed.
    Withdrawal,

    /// Transfer funds from one account to another
    ///
    /// Attributed to the sender; the recipient's credit is part of the same
    /// atomic operation and does not get its own record.
    SendMoney,

    /// Unilateral credit with no modeled counterpart debit
    ReceiveMoney,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdrawal => "Withdrawal",
            TransactionKind::SendMoney => "Send Money",
            TransactionKind::ReceiveMoney => "Receive Money",
        };
        write!(f, "{}", label)
    }
}

/// Immutable audit record of one committed ledger mutation
///
/// Records are never mutated or deleted once appended; their order in the
/// log is commit order.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    /// Time of commit
    pub timestamp: DateTime<Utc>,

    /// The primarily affected account (for transfers, the sender)
    pub card: CardNumber,

    /// The kind of operation committed
    pub kind: TransactionKind,

    /// Amount moved, strictly positive
    pub amount: Decimal,
}
