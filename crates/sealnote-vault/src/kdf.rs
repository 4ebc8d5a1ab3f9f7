// SPDX-FileCopyrightText: 2026 Sealnote Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential-key derivation from a password.
//!
//! PBKDF2-HMAC-SHA256 over the password and a stored 16-byte salt yields
//! a 128-bit credential key. The salt is the only derivation parameter
//! ever persisted; the iteration count and hash are fixed at the
//! code/config layer, so changing them breaks decryption of existing
//! stores unless migrated explicitly.

use std::fmt;
use std::num::NonZeroU32;

use secrecy::{ExposeSecret, SecretString};
use sealnote_core::{RecordStore, SealnoteError};
use tracing::debug;
use zeroize::Zeroizing;

use crate::provider::{self, KEY_LEN};

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// The in-memory credential key.
///
/// An opaque handle: the raw derived bits never leave this crate, and the
/// backing buffer is zeroed on drop. Never persisted.
pub struct CredentialKey {
    bytes: Zeroizing<[u8; KEY_LEN]>,
}

impl CredentialKey {
    pub(crate) fn new(bytes: Zeroizing<[u8; KEY_LEN]>) -> Self {
        Self { bytes }
    }

    pub(crate) fn bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl fmt::Debug for CredentialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Derive the credential key for `password` against the store's salt.
///
/// With `regenerate_salt`, or when no salt is stored yet (first login),
/// 16 fresh random bytes are generated and persisted before derivation;
/// that write is the only store mutation in this function and the last
/// step before the derivation itself. Otherwise the stored salt is used
/// unchanged, so the same password derives the same key across sessions.
///
/// Fails with `TamperedProvider` before touching anything else when the
/// provider guard trips.
pub async fn derive_credential_key<S: RecordStore + ?Sized>(
    store: &S,
    password: &SecretString,
    regenerate_salt: bool,
    iterations: u32,
) -> Result<CredentialKey, SealnoteError> {
    let provider = provider::checked()?;

    let iterations = NonZeroU32::new(iterations)
        .ok_or_else(|| SealnoteError::Config("kdf_iterations must be non-zero".to_string()))?;

    let mut record = store.key_gen().await?;
    let salt: [u8; SALT_LEN] = match (&record.derive_key_salt, regenerate_salt) {
        (Some(salt), false) => salt.as_slice().try_into().map_err(|_| {
            SealnoteError::Internal(format!(
                "stored salt has wrong length: {} bytes",
                salt.len()
            ))
        })?,
        _ => {
            let mut salt = [0u8; SALT_LEN];
            (provider.random_bytes)(&mut salt)?;
            record.derive_key_salt = Some(salt.to_vec());
            store.put_key_gen(&record).await?;
            debug!(regenerate_salt, "new derivation salt persisted");
            salt
        }
    };

    let mut out = Zeroizing::new([0u8; KEY_LEN]);
    (provider.derive_key)(
        password.expose_secret().as_bytes(),
        &salt,
        iterations,
        &mut out[..],
    );

    Ok(CredentialKey::new(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sealnote_config::StorageConfig;
    use sealnote_storage::SqliteRecordStore;
    use tempfile::tempdir;

    // High enough to be a real PBKDF2 run, low enough to keep tests fast.
    const TEST_ITERATIONS: u32 = 1_000;

    async fn open_test_store() -> (SqliteRecordStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let config = StorageConfig {
            database_path: dir.path().join("kdf.db").to_string_lossy().into_owned(),
            wal_mode: true,
        };
        (SqliteRecordStore::open(&config).await.unwrap(), dir)
    }

    fn password(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    #[tokio::test]
    async fn first_derivation_creates_and_persists_a_salt() {
        let (store, _dir) = open_test_store().await;
        assert!(store.key_gen().await.unwrap().derive_key_salt.is_none());

        let _key = derive_credential_key(&store, &password("pw"), false, TEST_ITERATIONS)
            .await
            .unwrap();

        let salt = store.key_gen().await.unwrap().derive_key_salt.unwrap();
        assert_eq!(salt.len(), SALT_LEN);
    }

    #[tokio::test]
    async fn same_password_and_salt_derive_the_same_key() {
        let (store, _dir) = open_test_store().await;

        let k1 = derive_credential_key(&store, &password("pw"), false, TEST_ITERATIONS)
            .await
            .unwrap();
        let k2 = derive_credential_key(&store, &password("pw"), false, TEST_ITERATIONS)
            .await
            .unwrap();

        assert_eq!(k1.bytes(), k2.bytes());
    }

    #[tokio::test]
    async fn distinct_passwords_derive_distinct_keys() {
        let (store, _dir) = open_test_store().await;

        // Seed the salt once so every derivation shares it.
        let _ = derive_credential_key(&store, &password("seed"), false, TEST_ITERATIONS)
            .await
            .unwrap();

        let samples = ["a", "b", "abc123", "abc124", "correct horse", ""];
        let mut keys = Vec::new();
        for p in samples {
            let key = derive_credential_key(&store, &password(p), false, TEST_ITERATIONS)
                .await
                .unwrap();
            keys.push(*key.bytes());
        }
        for i in 0..keys.len() {
            for j in i + 1..keys.len() {
                assert_ne!(keys[i], keys[j], "samples {i} and {j} collided");
            }
        }
    }

    #[tokio::test]
    async fn regenerate_salt_rotates_salt_and_key() {
        let (store, _dir) = open_test_store().await;

        let k1 = derive_credential_key(&store, &password("pw"), false, TEST_ITERATIONS)
            .await
            .unwrap();
        let salt1 = store.key_gen().await.unwrap().derive_key_salt.unwrap();

        let k2 = derive_credential_key(&store, &password("pw"), true, TEST_ITERATIONS)
            .await
            .unwrap();
        let salt2 = store.key_gen().await.unwrap().derive_key_salt.unwrap();

        assert_ne!(salt1, salt2);
        assert_ne!(k1.bytes(), k2.bytes());
    }

    #[tokio::test]
    async fn salt_reuse_does_not_mutate_the_store() {
        let (store, _dir) = open_test_store().await;

        let _ = derive_credential_key(&store, &password("pw"), false, TEST_ITERATIONS)
            .await
            .unwrap();
        let before = store.key_gen().await.unwrap();

        let _ = derive_credential_key(&store, &password("other"), false, TEST_ITERATIONS)
            .await
            .unwrap();
        let after = store.key_gen().await.unwrap();

        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn zero_iterations_is_rejected() {
        let (store, _dir) = open_test_store().await;
        let result = derive_credential_key(&store, &password("pw"), false, 0).await;
        assert!(matches!(result, Err(SealnoteError::Config(_))));
    }

    #[test]
    fn credential_key_debug_redacts_key_material() {
        let key = CredentialKey::new(Zeroizing::new([0xAB; KEY_LEN]));
        let rendered = format!("{key:?}");
        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains("171")); // 0xAB
    }
}
