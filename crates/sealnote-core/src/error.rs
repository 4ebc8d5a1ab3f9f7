// SPDX-FileCopyrightText: 2026 Sealnote Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared across the Sealnote workspace.

use thiserror::Error;

/// The primary error type used across the record store, the crypto
/// pipeline, and the session orchestrator.
#[derive(Debug, Error)]
pub enum SealnoteError {
    /// Configuration errors (invalid TOML, missing required fields, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Backing store open/read/write failure. Surfaced to the caller,
    /// never retried automatically.
    #[error("store unavailable: {source}")]
    StoreUnavailable {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The crypto provider integrity guard tripped. Fatal to the
    /// operation, no retry.
    #[error("crypto provider has been tampered with")]
    TamperedProvider,

    /// A crypto primitive failed outside of authentication (CSPRNG
    /// failure, key import failure).
    #[error("crypto primitive failure: {0}")]
    Crypto(String),

    /// Authenticated decryption failed: wrong key, corrupted ciphertext,
    /// or tampered data. Indistinguishable from a wrong password on
    /// purpose.
    #[error("decryption failed -- wrong key or corrupted data")]
    DecryptionFailed,

    /// Decrypted bytes do not look like ordinary text. Treated the same
    /// as a wrong password at the user boundary.
    #[error("decrypted data does not look like plaintext")]
    PlausibilityCheckFailed,

    /// Rejected user input (empty password, mismatched confirmation).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SealnoteError {
    /// True for the two failure kinds that the user boundary renders as
    /// "you probably entered the wrong password". They are deliberately
    /// never distinguished in user-facing output.
    pub fn is_probably_wrong_password(&self) -> bool {
        matches!(
            self,
            SealnoteError::DecryptionFailed | SealnoteError::PlausibilityCheckFailed
        )
    }
}
