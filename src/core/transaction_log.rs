//! Append-only transaction log
//!
//! This module provides the TransactionLog component that records every
//! committed ledger mutation for audit display and receipt generation.
//!
//! # Append-only discipline
//!
//! Records are appended at commit time and never mutated or deleted. Their
//! position in the log is commit order, which is the order `iter` yields
//! them in and the order "latest" queries are resolved against. The log
//! hands out only immutable views, so no external component can rewrite
//! history.

use crate::types::{CardNumber, LedgerError, TransactionKind, TransactionRecord};
use chrono::Utc;
use rust_decimal::Decimal;

/// Append-only record of committed ledger mutations
pub struct TransactionLog {
    records: Vec<TransactionRecord>,
}

impl TransactionLog {
    /// Create a new empty log
    pub fn new() -> Self {
        TransactionLog {
            records: Vec::new(),
        }
    }

    /// Append one record, stamped with the commit time
    ///
    /// Called by the ledger after an operation's balance changes have been
    /// applied; the amount is expected to be validated (strictly positive)
    /// by that point.
    ///
    /// # Arguments
    ///
    /// * `card` - The primarily affected account (for transfers, the sender)
    /// * `kind` - The kind of operation committed
    /// * `amount` - The amount moved
    pub fn append(&mut self, card: CardNumber, kind: TransactionKind, amount: Decimal) {
        self.records.push(TransactionRecord {
            timestamp: Utc::now(),
            card,
            kind,
            amount,
        });
    }

    /// The most recently appended record
    ///
    /// # Returns
    ///
    /// * `Ok(&TransactionRecord)` - The last record in commit order
    /// * `Err(LedgerError::NoTransactions)` - The log is empty
    pub fn latest(&self) -> Result<&TransactionRecord, LedgerError> {
        self.records.last().ok_or(LedgerError::NoTransactions)
    }

    /// Iterate over all records in commit order
    ///
    /// The iterator borrows the log immutably; it is finite, restartable,
    /// and cannot be used to mutate the underlying records.
    pub fn iter(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.records.iter()
    }

    /// Number of records in the log
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for TransactionLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_log_is_empty() {
        let log = TransactionLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
        assert_eq!(log.iter().count(), 0);
    }

    #[test]
    fn test_latest_on_empty_log_fails() {
        let log = TransactionLog::new();
        let result = log.latest();
        assert!(matches!(result, Err(LedgerError::NoTransactions)));
    }

    #[test]
    fn test_append_preserves_commit_order() {
        let mut log = TransactionLog::new();
        let card = "1234567890123456".to_string();

        log.append(card.clone(), TransactionKind::Deposit, Decimal::new(10000, 2));
        log.append(card.clone(), TransactionKind::Withdrawal, Decimal::new(2500, 2));
        log.append(card.clone(), TransactionKind::SendMoney, Decimal::new(5000, 2));

        let kinds: Vec<_> = log.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TransactionKind::Deposit,
                TransactionKind::Withdrawal,
                TransactionKind::SendMoney,
            ]
        );
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_latest_is_last_appended() {
        let mut log = TransactionLog::new();
        let card = "1234567890123456".to_string();

        log.append(card.clone(), TransactionKind::Deposit, Decimal::new(10000, 2));
        log.append(card.clone(), TransactionKind::ReceiveMoney, Decimal::new(700, 2));

        let latest = log.latest().unwrap();
        assert_eq!(latest.kind, TransactionKind::ReceiveMoney);
        assert_eq!(latest.amount, Decimal::new(700, 2));
        assert_eq!(latest.card, card);
    }

    #[test]
    fn test_iter_is_restartable() {
        let mut log = TransactionLog::new();
        log.append(
            "1234567890123456".to_string(),
            TransactionKind::Deposit,
            Decimal::ONE,
        );

        assert_eq!(log.iter().count(), 1);
        // A second pass sees the same records.
        assert_eq!(log.iter().count(), 1);
    }

    #[test]
    fn test_timestamps_are_monotonic_in_commit_order() {
        let mut log = TransactionLog::new();
        let card = "1234567890123456".to_string();

        for _ in 0..5 {
            log.append(card.clone(), TransactionKind::Deposit, Decimal::ONE);
        }

        let timestamps: Vec<_> = log.iter().map(|r| r.timestamp).collect();
        for pair in timestamps.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }
}
