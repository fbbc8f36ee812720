//! Credential enrollment and verification
//!
//! This module provides the `CredentialStore`, which proves possession of a
//! card PIN without ever storing the PIN itself. Enrollment draws a random
//! salt from the OS CSPRNG and derives a key with PBKDF2-HMAC-SHA256;
//! verification re-derives with identical parameters and compares keys in
//! constant time.
//!
//! The store owns no account state. Authentication reports a single generic
//! failure for both "unknown card" and "wrong PIN": when no credentials
//! exist for the presented card, a derivation is still performed against
//! dummy material so the two cases are not distinguishable by timing.
//!
//! Derivation is CPU-bound and deliberately slow. Callers must not hold the
//! ledger lock while authenticating; see `SharedLedger::credentials`.

use crate::types::{Credentials, LedgerError, KEY_LEN, SALT_LEN};
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::{Rng, RngCore};
use sha2::Sha256;
use subtle::ConstantTimeEq;

/// Default PBKDF2 iteration count
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Number of digits in a card number
const CARD_NUMBER_LEN: usize = 16;

/// Derives and verifies PIN-based secret keys
///
/// Stateless apart from the iteration count; safe to share between an
/// authentication path and an enrollment path.
#[derive(Debug, Clone, Copy)]
pub struct CredentialStore {
    iterations: u32,
}

impl CredentialStore {
    /// Create a store with the default iteration count
    pub fn new() -> Self {
        CredentialStore {
            iterations: PBKDF2_ITERATIONS,
        }
    }

    /// Create a store with a custom iteration count
    ///
    /// Intended for tests that cannot afford the full derivation cost.
    /// Production callers should use [`CredentialStore::new`], which applies
    /// the default of 100,000 iterations.
    pub fn with_iterations(iterations: u32) -> Self {
        CredentialStore { iterations }
    }

    /// Enroll a PIN, producing fresh credential material
    ///
    /// Generates a random 16-byte salt from the OS CSPRNG and derives a
    /// 32-byte key from the PIN and salt. The PIN is not retained.
    ///
    /// # Arguments
    ///
    /// * `pin` - The secret to enroll
    ///
    /// # Returns
    ///
    /// The salt and derived key to be persisted by the caller
    pub fn enroll(&self, pin: &str) -> Credentials {
        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);

        let key = self.derive(pin, &salt);
        Credentials { salt, key }
    }

    /// Check a PIN against enrolled credentials
    ///
    /// Re-derives a key from `pin` and the enrolled salt with identical
    /// parameters and compares it with the enrolled key in constant time.
    ///
    /// # Arguments
    ///
    /// * `pin` - The secret being checked
    /// * `credentials` - Salt and expected key from enrollment
    ///
    /// # Returns
    ///
    /// `true` iff the derived key equals the enrolled key
    pub fn verify(&self, pin: &str, credentials: &Credentials) -> bool {
        let derived = self.derive(pin, &credentials.salt);
        derived.ct_eq(&credentials.key).into()
    }

    /// Authenticate a PIN against optionally-present credentials
    ///
    /// The single entry point for the authentication flow: the caller looks
    /// up credentials for the presented card (which may not exist) and
    /// passes the lookup result here. A derivation is performed whether or
    /// not credentials exist, so an unknown card and a wrong PIN cost the
    /// same time and produce the same error.
    ///
    /// # Arguments
    ///
    /// * `pin` - The secret being checked
    /// * `credentials` - Enrolled material for the card, if the card exists
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The PIN matches the enrolled credentials
    /// * `Err(LedgerError::AuthenticationFailed)` - Unknown card or wrong PIN
    pub fn authenticate(
        &self,
        pin: &str,
        credentials: Option<&Credentials>,
    ) -> Result<(), LedgerError> {
        // Dummy material keeps the derivation cost identical when the card
        // is unknown. The all-zero key never matches a real derivation.
        const DUMMY: Credentials = Credentials {
            salt: [0u8; SALT_LEN],
            key: [0u8; KEY_LEN],
        };

        let matched = self.verify(pin, credentials.unwrap_or(&DUMMY));
        if matched && credentials.is_some() {
            Ok(())
        } else {
            Err(LedgerError::AuthenticationFailed)
        }
    }

    /// Derive a key from a PIN and salt
    fn derive(&self, pin: &str, salt: &[u8; SALT_LEN]) -> [u8; KEY_LEN] {
        let mut key = [0u8; KEY_LEN];
        pbkdf2_hmac::<Sha256>(pin.as_bytes(), salt, self.iterations, &mut key);
        key
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a random 16-digit card number
///
/// Draws every digit from the OS CSPRNG so generated numbers are not
/// guessable. Uniqueness is the enrolling caller's concern.
pub fn generate_card_number() -> String {
    let mut rng = OsRng;
    (0..CARD_NUMBER_LEN)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}
