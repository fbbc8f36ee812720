//! Ledger mutation engine
//!
//! This module provides the LedgerEngine, which exclusively owns the
//! account map, the e-wallet map, and the append-only transaction log for
//! the lifetime of the process. All balance mutations go through its
//! operations; no external component touches the maps directly.
//!
//! # Atomicity
//!
//! Every operation is a single atomic transition: it either fully commits
//! (all balance changes plus exactly one log record) or produces no state
//! change at all. Validation — amount sign, account existence, sufficient
//! funds, overflow — happens before any mutation, so failure paths leave
//! state byte-for-byte unchanged. This holds for transfers touching two
//! accounts as well.

use crate::core::transaction_log::TransactionLog;
use crate::types::{
    Account, CardNumber, Credentials, LedgerError, TransactionKind, TransactionRecord, Wallet,
};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// In-memory account ledger with an append-only audit trail
pub struct LedgerEngine {
    /// Map of card number to enrolled account
    accounts: HashMap<CardNumber, Account>,

    /// Map of card number to e-wallet, at most one per account
    wallets: HashMap<CardNumber, Wallet>,

    /// Audit trail of committed mutations
    log: TransactionLog,
}

impl LedgerEngine {
    /// Create an empty ledger
    pub fn new() -> Self {
        LedgerEngine {
            accounts: HashMap::new(),
            wallets: HashMap::new(),
            log: TransactionLog::new(),
        }
    }

    /// Create a ledger pre-populated with enrolled accounts
    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let mut ledger = LedgerEngine::new();
        for account in accounts {
            ledger.enroll_account(account);
        }
        ledger
    }

    /// Add an enrolled account to the ledger
    ///
    /// Card numbers are unique: if an account with the same card number is
    /// already enrolled, the first enrollment wins and the new one is
    /// ignored.
    pub fn enroll_account(&mut self, account: Account) {
        self.accounts.entry(account.card.clone()).or_insert(account);
    }

    /// Credential material for a card, if the card is enrolled
    ///
    /// Returns a clone so PIN verification can run outside the ledger's
    /// critical section. Callers must not branch on the `None` case in any
    /// user-visible way; pass the option straight to
    /// [`CredentialStore::authenticate`](crate::core::CredentialStore::authenticate).
    pub fn credentials(&self, card: &str) -> Option<Credentials> {
        self.accounts.get(card).map(|a| a.credentials.clone())
    }

    /// Current balance of an account
    ///
    /// Pure read, no log entry.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the card is not enrolled.
    pub fn check_balance(&self, card: &str) -> Result<Decimal, LedgerError> {
        Ok(self.account(card)?.balance)
    }

    /// Credit funds to an account
    ///
    /// # Arguments
    ///
    /// * `card` - Card number of the account to credit
    /// * `amount` - Amount to credit, strictly positive
    ///
    /// # Returns
    ///
    /// The new balance after the deposit committed
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The amount is not strictly positive (`InvalidAmount`)
    /// - The card is not enrolled (`AccountNotFound`)
    /// - The new balance would overflow (`ArithmeticOverflow`)
    pub fn deposit(&mut self, card: &str, amount: Decimal) -> Result<Decimal, LedgerError> {
        require_positive(amount)?;

        let new_balance = self
            .account(card)?
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("deposit", card))?;

        self.account_mut(card)?.balance = new_balance;
        self.log
            .append(card.to_string(), TransactionKind::Deposit, amount);

        Ok(new_balance)
    }

    /// Debit funds from an account
    ///
    /// # Arguments
    ///
    /// * `card` - Card number of the account to debit
    /// * `amount` - Amount to debit, strictly positive
    ///
    /// # Returns
    ///
    /// The new balance after the withdrawal committed
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The amount is not strictly positive (`InvalidAmount`)
    /// - The card is not enrolled (`AccountNotFound`)
    /// - The amount exceeds the balance (`InsufficientFunds`)
    pub fn withdraw(&mut self, card: &str, amount: Decimal) -> Result<Decimal, LedgerError> {
        require_positive(amount)?;

        let balance = self.account(card)?.balance;
        if amount > balance {
            return Err(LedgerError::insufficient_funds(card, balance, amount));
        }

        let new_balance = balance
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("withdrawal", card))?;

        self.account_mut(card)?.balance = new_balance;
        self.log
            .append(card.to_string(), TransactionKind::Withdrawal, amount);

        Ok(new_balance)
    }

    /// Move funds from one account to another
    ///
    /// Debits the sender and credits the recipient as one indivisible
    /// transition, appending exactly one `SendMoney` record attributed to
    /// the sender. The sum of the two balances is invariant across the
    /// call.
    ///
    /// # Arguments
    ///
    /// * `from` - Card number of the sender
    /// * `to` - Card number of the recipient
    /// * `amount` - Amount to move, strictly positive
    ///
    /// # Returns
    ///
    /// The new `(sender, recipient)` balances after the transfer committed
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The amount is not strictly positive (`InvalidAmount`)
    /// - Sender and recipient are the same card (`SameAccount`)
    /// - Either card is not enrolled (`AccountNotFound`)
    /// - The amount exceeds the sender's balance (`InsufficientFunds`)
    /// - The recipient's balance would overflow (`ArithmeticOverflow`)
    pub fn transfer(
        &mut self,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> Result<(Decimal, Decimal), LedgerError> {
        require_positive(amount)?;

        // Self-transfers are rejected rather than committed as a no-op so
        // the log never carries a spurious record.
        if from == to {
            return Err(LedgerError::same_account(from));
        }

        let sender_balance = self.account(from)?.balance;
        let recipient_balance = self.account(to)?.balance;

        if amount > sender_balance {
            return Err(LedgerError::insufficient_funds(from, sender_balance, amount));
        }

        let new_sender = sender_balance
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("transfer", from))?;
        let new_recipient = recipient_balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("transfer", to))?;

        // All validation done; commit both balances and the single record.
        self.account_mut(from)?.balance = new_sender;
        self.account_mut(to)?.balance = new_recipient;
        self.log
            .append(from.to_string(), TransactionKind::SendMoney, amount);

        Ok((new_sender, new_recipient))
    }

    /// Credit funds to an account with no modeled counterpart debit
    ///
    /// A standalone unilateral credit (an external inbound payment
    /// channel); no hidden debit side is invented.
    ///
    /// # Arguments
    ///
    /// * `card` - Card number of the account to credit
    /// * `amount` - Amount to credit, strictly positive
    ///
    /// # Returns
    ///
    /// The new balance after the credit committed
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The amount is not strictly positive (`InvalidAmount`)
    /// - The card is not enrolled (`AccountNotFound`)
    /// - The new balance would overflow (`ArithmeticOverflow`)
    pub fn receive(&mut self, card: &str, amount: Decimal) -> Result<Decimal, LedgerError> {
        require_positive(amount)?;

        let new_balance = self
            .account(card)?
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("receive", card))?;

        self.account_mut(card)?.balance = new_balance;
        self.log
            .append(card.to_string(), TransactionKind::ReceiveMoney, amount);

        Ok(new_balance)
    }

    /// Create an e-wallet for an account
    ///
    /// The wallet starts at zero balance. Wallet creation is not a balance
    /// mutation and appends no log record.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The card is not enrolled (`AccountNotFound`)
    /// - The account already has a wallet (`WalletAlreadyExists`)
    pub fn create_wallet(&mut self, card: &str) -> Result<(), LedgerError> {
        self.account(card)?;

        if self.wallets.contains_key(card) {
            return Err(LedgerError::wallet_already_exists(card));
        }

        self.wallets
            .insert(card.to_string(), Wallet::new(card.to_string()));
        Ok(())
    }

    /// Current balance of an account's e-wallet
    ///
    /// # Errors
    ///
    /// Returns `WalletNotFound` if the account has no wallet.
    pub fn wallet_balance(&self, card: &str) -> Result<Decimal, LedgerError> {
        self.wallets
            .get(card)
            .map(|w| w.balance)
            .ok_or_else(|| LedgerError::wallet_not_found(card))
    }

    /// The most recently committed transaction
    ///
    /// # Errors
    ///
    /// Returns `NoTransactions` if nothing has been committed yet.
    pub fn latest_receipt(&self) -> Result<TransactionRecord, LedgerError> {
        self.log.latest().cloned()
    }

    /// Iterate over the full transaction history in commit order
    ///
    /// The iterator borrows the ledger immutably and cannot mutate the log.
    pub fn history(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.log.iter()
    }

    /// Number of committed transactions
    pub fn transaction_count(&self) -> usize {
        self.log.len()
    }

    fn account(&self, card: &str) -> Result<&Account, LedgerError> {
        self.accounts
            .get(card)
            .ok_or_else(|| LedgerError::account_not_found(card))
    }

    fn account_mut(&mut self, card: &str) -> Result<&mut Account, LedgerError> {
        self.accounts
            .get_mut(card)
            .ok_or_else(|| LedgerError::account_not_found(card))
    }
}

impl Default for LedgerEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject amounts that are not strictly positive
fn require_positive(amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::invalid_amount(amount));
    }
    Ok(())
}
