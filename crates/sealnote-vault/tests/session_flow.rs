// SPDX-FileCopyrightText: 2026 Sealnote Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end session flows over a real SQLite record store.

use secrecy::SecretString;
use sealnote_config::{StorageConfig, VaultConfig};
use sealnote_core::RecordStore;
use sealnote_storage::SqliteRecordStore;
use sealnote_vault::Session;
use tempfile::tempdir;

fn test_vault_config() -> VaultConfig {
    // Low cost keeps the PBKDF2 runs fast; production default is 1,000,000.
    VaultConfig {
        kdf_iterations: 1_000,
    }
}

fn storage_config(dir: &tempfile::TempDir) -> StorageConfig {
    StorageConfig {
        database_path: dir.path().join("flow.db").to_string_lossy().into_owned(),
        wal_mode: true,
    }
}

async fn open_session(config: &StorageConfig) -> Session<SqliteRecordStore> {
    let store = SqliteRecordStore::open(config).await.unwrap();
    Session::new(store, &test_vault_config())
}

fn password(s: &str) -> SecretString {
    SecretString::from(s.to_string())
}

#[tokio::test]
async fn full_account_lifecycle() {
    let dir = tempdir().unwrap();
    let config = storage_config(&dir);

    // First run: no store yet.
    assert!(!SqliteRecordStore::store_exists(&config.database_path));

    // Empty store: login succeeds and the payload defaults to empty.
    let mut session = open_session(&config).await;
    assert_eq!(session.login("user", &password("abc123")).await.unwrap(), "");
    session.save("secret-note").await.unwrap();
    drop(session);

    assert!(SqliteRecordStore::store_exists(&config.database_path));

    // Fresh handle: the saved payload comes back under the same password.
    let mut session = open_session(&config).await;
    assert_eq!(
        session.login("user", &password("abc123")).await.unwrap(),
        "secret-note"
    );

    // Wrong password on a fresh handle fails as wrong credentials.
    let mut other = open_session(&config).await;
    let err = other.login("user", &password("wrong-pw")).await.unwrap_err();
    assert!(err.is_probably_wrong_password());
    assert!(!other.is_logged_in());
    drop(other);

    // Change the password while logged in, then log out.
    session.change_password(&password("xyz789")).await.unwrap();
    session.logout();

    // The payload survives under the new password.
    assert_eq!(
        session.login("user", &password("xyz789")).await.unwrap(),
        "secret-note"
    );
    session.logout();

    // The old password no longer works.
    let err = session.login("user", &password("abc123")).await.unwrap_err();
    assert!(err.is_probably_wrong_password());
}

#[tokio::test]
async fn wrong_password_never_mutates_stored_records() {
    let dir = tempdir().unwrap();
    let config = storage_config(&dir);

    let mut session = open_session(&config).await;
    session.login("user", &password("right")).await.unwrap();
    session.save("guarded").await.unwrap();

    let key_gen_before = session.store().key_gen().await.unwrap();
    let payload_before = session.store().payload().await.unwrap();
    session.logout();

    let err = session.login("user", &password("not right")).await.unwrap_err();
    assert!(err.is_probably_wrong_password());
    assert!(!session.is_logged_in());

    assert_eq!(session.store().key_gen().await.unwrap(), key_gen_before);
    assert_eq!(session.store().payload().await.unwrap(), payload_before);
}

#[tokio::test]
async fn change_password_reencrypts_the_payload_in_place() {
    let dir = tempdir().unwrap();
    let config = storage_config(&dir);

    let mut session = open_session(&config).await;
    session.login("user", &password("old-pw")).await.unwrap();
    session.save("the same words").await.unwrap();

    let blob_before = session.store().payload().await.unwrap().sensitive_data;
    let salt_before = session.store().key_gen().await.unwrap().derive_key_salt;

    session.change_password(&password("new-pw")).await.unwrap();

    // Both the salt and the stored ciphertext must have advanced together.
    let blob_after = session.store().payload().await.unwrap().sensitive_data;
    let salt_after = session.store().key_gen().await.unwrap().derive_key_salt;
    assert_ne!(blob_before, blob_after);
    assert_ne!(salt_before, salt_after);

    // The session key was replaced: saving still works without re-login.
    session.save("the same words").await.unwrap();

    session.logout();
    assert_eq!(
        session.login("user", &password("new-pw")).await.unwrap(),
        "the same words"
    );
}

#[tokio::test]
async fn change_password_without_payload_still_rotates_key_and_salt() {
    let dir = tempdir().unwrap();
    let config = storage_config(&dir);

    let mut session = open_session(&config).await;
    session.login("user", &password("first")).await.unwrap();
    let salt_before = session.store().key_gen().await.unwrap().derive_key_salt;

    session.change_password(&password("second")).await.unwrap();

    let salt_after = session.store().key_gen().await.unwrap().derive_key_salt;
    assert_ne!(salt_before, salt_after);
    assert!(
        session
            .store()
            .payload()
            .await
            .unwrap()
            .sensitive_data
            .is_none()
    );

    session.logout();
    assert_eq!(
        session.login("user", &password("second")).await.unwrap(),
        ""
    );
}

#[tokio::test]
async fn wipe_resets_to_first_run() {
    let dir = tempdir().unwrap();
    let config = storage_config(&dir);

    let mut session = open_session(&config).await;
    session.login("user", &password("abc123")).await.unwrap();
    session.save("gone soon").await.unwrap();

    session.wipe().await.unwrap();
    assert!(!session.is_logged_in());
    assert!(!SqliteRecordStore::store_exists(&config.database_path));

    // A brand new store behaves like a first run: no salt, empty payload.
    let mut session = open_session(&config).await;
    assert_eq!(session.login("user", &password("abc123")).await.unwrap(), "");
}

#[tokio::test]
async fn username_plays_no_part_in_derivation() {
    let dir = tempdir().unwrap();
    let config = storage_config(&dir);

    let mut session = open_session(&config).await;
    session.login("alice", &password("shared")).await.unwrap();
    session.save("whose note is this").await.unwrap();
    drop(session);

    let mut session = open_session(&config).await;
    assert_eq!(
        session.login("bob", &password("shared")).await.unwrap(),
        "whose note is this"
    );
}
