//! Account-related types for the card ledger
//!
//! This module defines the Account structure, the enrolled credential
//! material attached to it, and the optional per-account e-wallet.

use rust_decimal::Decimal;

/// Card number identifying an account
///
/// A fixed-length numeric string (16 digits), unique and immutable
/// once the account is enrolled.
pub type CardNumber = String;

/// Length of the enrollment salt in bytes
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes
pub const KEY_LEN: usize = 32;

/// Enrolled credential material for one account
///
/// Holds the random salt generated at enrollment and the key derived from
/// the enrollment PIN. The PIN itself is never stored. Both fields are
/// immutable after enrollment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Random salt generated at enrollment
    pub salt: [u8; SALT_LEN],

    /// Key derived from the enrollment PIN and salt
    pub key: [u8; KEY_LEN],
}

impl Credentials {
    /// Decode credentials from their hex-encoded persisted form
    ///
    /// The profile store persists the salt as 32 hex characters and the key
    /// as 64 hex characters. Returns a description of the problem if either
    /// field is malformed or has the wrong length.
    pub fn from_hex(salt_hex: &str, key_hex: &str) -> Result<Self, String> {
        let salt_bytes = hex::decode(salt_hex.trim())
            .map_err(|e| format!("Invalid salt encoding: {}", e))?;
        let key_bytes =
            hex::decode(key_hex.trim()).map_err(|e| format!("Invalid key encoding: {}", e))?;

        let salt: [u8; SALT_LEN] = salt_bytes
            .try_into()
            .map_err(|v: Vec<u8>| format!("Salt must be {} bytes, got {}", SALT_LEN, v.len()))?;
        let key: [u8; KEY_LEN] = key_bytes
            .try_into()
            .map_err(|v: Vec<u8>| format!("Key must be {} bytes, got {}", KEY_LEN, v.len()))?;

        Ok(Credentials { salt, key })
    }

    /// Hex encoding of the salt for persistence
    pub fn salt_hex(&self) -> String {
        hex::encode(self.salt)
    }

    /// Hex encoding of the derived key for persistence
    pub fn key_hex(&self) -> String {
        hex::encode(self.key)
    }
}

/// Enrolled account state
///
/// Represents one enrolled card: its number, the credential material
/// produced at enrollment, and the current balance.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// The 16-digit card number
    pub card: CardNumber,

    /// Credential material set at enrollment, immutable afterwards
    pub credentials: Credentials,

    /// Current balance
    ///
    /// Invariant: never negative after any committed operation.
    pub balance: Decimal,
}

impl Account {
    /// Create a new account with the given opening balance
    pub fn new(card: CardNumber, credentials: Credentials, opening_balance: Decimal) -> Self {
        Account {
            card,
            credentials,
            balance: opening_balance,
        }
    }
}

/// E-wallet attached to an account
///
/// Created once per account on explicit request, starting at zero balance.
#[derive(Debug, Clone, PartialEq)]
pub struct Wallet {
    /// Card number of the owning account
    pub owner: CardNumber,

    /// Current wallet balance, never negative
    pub balance: Decimal,
}

impl Wallet {
    /// Create an empty wallet for the given account
    pub fn new(owner: CardNumber) -> Self {
        Wallet {
            owner,
            balance: Decimal::ZERO,
        }
    }
}
