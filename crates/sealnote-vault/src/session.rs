// SPDX-FileCopyrightText: 2026 Sealnote Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session orchestration: login, save, password change, logout, wipe.
//!
//! A session is either logged out or holds the one live credential key.
//! Successful decryption plus a plaintext plausibility heuristic stand in
//! for authentication -- a weak password-correctness signal, kept
//! deliberately (see DESIGN.md), not a security boundary.
//!
//! Every operation takes `&mut self`: the exclusive borrow is the
//! single-flight lock that keeps save and change-password from
//! interleaving on one store.

use secrecy::SecretString;
use sealnote_config::VaultConfig;
use sealnote_core::{PayloadRecord, RecordStore, SealnoteError};
use tracing::{debug, info};

use crate::crypto;
use crate::kdf::{self, CredentialKey};

enum SessionState {
    LoggedOut,
    LoggedIn { key: CredentialKey },
}

/// A single-user session over one record store.
pub struct Session<S: RecordStore> {
    store: S,
    kdf_iterations: u32,
    state: SessionState,
}

impl<S: RecordStore> Session<S> {
    /// Create a logged-out session over `store`.
    pub fn new(store: S, config: &VaultConfig) -> Self {
        Self {
            store,
            kdf_iterations: config.kdf_iterations,
            state: SessionState::LoggedOut,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.state, SessionState::LoggedIn { .. })
    }

    /// The underlying record store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Log in and return the decrypted payload (empty string when no
    /// payload has been saved yet).
    ///
    /// `username` is accepted for interface compatibility but takes no
    /// part in key derivation or any check.
    ///
    /// The first login against a fresh store generates and persists the
    /// derivation salt; afterwards login never mutates stored records.
    /// On decryption failure or an implausible plaintext the derived key
    /// is discarded, the session stays logged out, and the error maps to
    /// "you probably entered the wrong password" at the user boundary.
    pub async fn login(
        &mut self,
        _username: &str,
        password: &SecretString,
    ) -> Result<String, SealnoteError> {
        let key =
            kdf::derive_credential_key(&self.store, password, false, self.kdf_iterations).await?;

        let payload = self.store.payload().await?;
        let text = match payload.sensitive_data {
            Some(blob) => crypto::open(&blob, &key)?,
            None => String::new(),
        };

        if !is_probably_plaintext(&text) {
            debug!("decrypted payload failed the plausibility check");
            return Err(SealnoteError::PlausibilityCheckFailed);
        }

        self.state = SessionState::LoggedIn { key };
        info!("login succeeded");
        Ok(text)
    }

    /// Encrypt `content` and replace the stored payload.
    pub async fn save(&mut self, content: &str) -> Result<(), SealnoteError> {
        let key = self.key()?;
        let blob = crypto::seal(content, key)?;

        let mut payload = self.store.payload().await?;
        payload.sensitive_data = Some(blob);
        self.store.put_payload(&payload).await?;

        debug!(bytes = content.len(), "payload saved");
        Ok(())
    }

    /// Rotate the password: derive a new key under a fresh salt,
    /// re-encrypt the existing payload with it, and replace the session
    /// key. When no payload exists yet the key and salt still rotate.
    ///
    /// The salt write and the payload write hit two records without a
    /// surrounding transaction, matching the stored layout's contract;
    /// the `&mut self` receiver keeps a second flow from starting in
    /// between.
    pub async fn change_password(
        &mut self,
        new_password: &SecretString,
    ) -> Result<(), SealnoteError> {
        if !self.is_logged_in() {
            return Err(SealnoteError::Internal("no active session".to_string()));
        }

        let new_key =
            kdf::derive_credential_key(&self.store, new_password, true, self.kdf_iterations)
                .await?;

        let payload = self.store.payload().await?;
        if let Some(blob) = payload.sensitive_data {
            let old_key = self.key()?;
            let text = crypto::open(&blob, old_key)?;
            let resealed = crypto::seal(&text, &new_key)?;
            self.store
                .put_payload(&PayloadRecord {
                    id: payload.id,
                    sensitive_data: Some(resealed),
                })
                .await?;
        }

        self.state = SessionState::LoggedIn { key: new_key };
        info!("password changed; payload re-encrypted under the new key");
        Ok(())
    }

    /// Discard the in-memory key. No store mutation.
    pub fn logout(&mut self) {
        self.state = SessionState::LoggedOut;
        debug!("logged out");
    }

    /// Destroy the record store and discard the key. Irreversible; works
    /// from any state.
    pub async fn wipe(&mut self) -> Result<(), SealnoteError> {
        self.state = SessionState::LoggedOut;
        self.store.destroy().await?;
        info!("session wiped");
        Ok(())
    }

    fn key(&self) -> Result<&CredentialKey, SealnoteError> {
        match &self.state {
            SessionState::LoggedIn { key } => Ok(key),
            SessionState::LoggedOut => {
                Err(SealnoteError::Internal("no active session".to_string()))
            }
        }
    }
}

/// Heuristic test that decrypted bytes look like ordinary text: any
/// control byte below 0x20 other than tab, LF, or CR fails it. False
/// positives are infrequent but expected.
fn is_probably_plaintext(text: &str) -> bool {
    !text
        .bytes()
        .any(|b| b < 0x20 && !matches!(b, 0x09 | 0x0A | 0x0D))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sealnote_config::StorageConfig;
    use sealnote_storage::SqliteRecordStore;
    use tempfile::tempdir;

    fn test_vault_config() -> VaultConfig {
        VaultConfig {
            kdf_iterations: 1_000,
        }
    }

    async fn open_test_session() -> (Session<SqliteRecordStore>, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let config = StorageConfig {
            database_path: dir.path().join("s.db").to_string_lossy().into_owned(),
            wal_mode: true,
        };
        let store = SqliteRecordStore::open(&config).await.unwrap();
        (Session::new(store, &test_vault_config()), dir)
    }

    fn password(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    #[test]
    fn plausibility_accepts_ordinary_text() {
        assert!(is_probably_plaintext(""));
        assert!(is_probably_plaintext("hello world"));
        assert!(is_probably_plaintext("tabs\tand\nnewlines\r\n"));
        assert!(is_probably_plaintext("emoji ☃ and accents é"));
    }

    #[test]
    fn plausibility_rejects_control_bytes() {
        assert!(!is_probably_plaintext("nul\u{0}"));
        assert!(!is_probably_plaintext("\u{1}"));
        assert!(!is_probably_plaintext("bell\u{7}"));
        assert!(!is_probably_plaintext("backspace\u{8}"));
        assert!(!is_probably_plaintext("vtab\u{B}"));
        assert!(!is_probably_plaintext("escape\u{1B}[0m"));
    }

    #[test]
    fn plausibility_allows_del_and_above() {
        // Only bytes below 0x20 are screened.
        assert!(is_probably_plaintext("\u{7F}"));
    }

    #[tokio::test]
    async fn save_without_login_is_rejected() {
        let (mut session, _dir) = open_test_session().await;
        let result = session.save("content").await;
        assert!(matches!(result, Err(SealnoteError::Internal(_))));
    }

    #[tokio::test]
    async fn change_password_without_login_is_rejected() {
        let (mut session, _dir) = open_test_session().await;
        let result = session.change_password(&password("new")).await;
        assert!(matches!(result, Err(SealnoteError::Internal(_))));

        // The failed call must not have rotated the salt.
        assert!(
            session
                .store()
                .key_gen()
                .await
                .unwrap()
                .derive_key_salt
                .is_none()
        );
    }

    #[tokio::test]
    async fn first_login_on_empty_store_yields_empty_payload() {
        let (mut session, _dir) = open_test_session().await;
        let text = session.login("user", &password("abc123")).await.unwrap();
        assert_eq!(text, "");
        assert!(session.is_logged_in());
    }

    #[tokio::test]
    async fn logout_discards_the_session_key() {
        let (mut session, _dir) = open_test_session().await;
        session.login("user", &password("abc123")).await.unwrap();
        session.logout();
        assert!(!session.is_logged_in());
        assert!(session.save("anything").await.is_err());
    }
}
