// SPDX-FileCopyrightText: 2026 Sealnote Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authenticated encryption of the payload under the credential key.
//!
//! Every call to [`seal`] draws a fresh random 96-bit nonce from the
//! provider's CSPRNG. Nonce reuse under the same key would be
//! catastrophic for GCM security.
//!
//! Wire format: `nonce(12) || ciphertext || tag(16)`, one contiguous
//! buffer. No version or algorithm byte is embedded; the format is
//! implicit and fixed.

use sealnote_core::SealnoteError;

use crate::kdf::CredentialKey;
use crate::provider::{self, NONCE_LEN};

/// GCM authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// Encrypt `plaintext`, returning the full wire blob.
pub fn seal(plaintext: &str, key: &CredentialKey) -> Result<Vec<u8>, SealnoteError> {
    let provider = provider::checked()?;
    let aead = (provider.import_key)(key.bytes())?;

    let mut nonce = [0u8; NONCE_LEN];
    (provider.random_bytes)(&mut nonce)?;

    let mut in_out = plaintext.as_bytes().to_vec();
    (provider.encrypt)(&aead, nonce, &mut in_out)?;

    let mut blob = Vec::with_capacity(NONCE_LEN + in_out.len());
    blob.extend_from_slice(&nonce);
    blob.append(&mut in_out);
    Ok(blob)
}

/// Decrypt a wire blob produced by [`seal`].
///
/// Fails with [`SealnoteError::DecryptionFailed`] when the tag does not
/// verify -- wrong key, corrupted ciphertext, or tampered data. The
/// caller cannot tell those apart from a wrong password, which is
/// deliberate.
pub fn open(blob: &[u8], key: &CredentialKey) -> Result<String, SealnoteError> {
    let provider = provider::checked()?;

    if blob.len() < NONCE_LEN + TAG_LEN {
        return Err(SealnoteError::DecryptionFailed);
    }
    let nonce: [u8; NONCE_LEN] = blob[..NONCE_LEN]
        .try_into()
        .map_err(|_| SealnoteError::DecryptionFailed)?;

    let aead = (provider.import_key)(key.bytes())?;
    let mut in_out = blob[NONCE_LEN..].to_vec();
    let plaintext_len = (provider.decrypt)(&aead, nonce, &mut in_out)?;
    in_out.truncate(plaintext_len);

    String::from_utf8(in_out).map_err(|_| SealnoteError::PlausibilityCheckFailed)
}
