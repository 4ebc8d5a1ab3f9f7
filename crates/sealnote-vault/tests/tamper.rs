// SPDX-FileCopyrightText: 2026 Sealnote Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tamper simulation for the provider integrity guard.
//!
//! This lives in its own test binary: installing a hostile provider table
//! poisons process-wide state, which must not interleave with the other
//! test suites. Everything is exercised in a single test for the same
//! reason.

use std::num::NonZeroU32;

use secrecy::SecretString;
use sealnote_config::{StorageConfig, VaultConfig};
use sealnote_storage::SqliteRecordStore;
use sealnote_vault::{Session, provider};
use tempfile::tempdir;

fn stub_derive_key(_password: &[u8], _salt: &[u8], _iterations: NonZeroU32, out: &mut [u8]) {
    out.fill(0x42);
}

#[tokio::test]
async fn swapped_primitive_after_snapshot_trips_every_operation() {
    let dir = tempdir().unwrap();
    let config = StorageConfig {
        database_path: dir.path().join("t.db").to_string_lossy().into_owned(),
        wal_mode: true,
    };
    let vault_config = VaultConfig {
        kdf_iterations: 1_000,
    };

    provider::snapshot();
    assert!(!provider::check());

    // A working session before the swap.
    let store = SqliteRecordStore::open(&config).await.unwrap();
    let mut session = Session::new(store, &vault_config);
    let pw = SecretString::from("abc123".to_string());
    session.login("user", &pw).await.unwrap();
    session.save("pre-tamper").await.unwrap();

    // Replace one primitive behind the pipeline's back.
    let mut tampered = provider::ring_table();
    tampered.derive_key = stub_derive_key;
    provider::install(tampered);
    assert!(provider::check());

    // Every crypto entry point now refuses to run rather than silently
    // using the replaced primitive.
    let err = session.save("post-tamper").await.unwrap_err();
    assert!(matches!(err, sealnote_core::SealnoteError::TamperedProvider));

    let err = session.change_password(&pw).await.unwrap_err();
    assert!(matches!(err, sealnote_core::SealnoteError::TamperedProvider));

    session.logout();
    let err = session.login("user", &pw).await.unwrap_err();
    assert!(matches!(err, sealnote_core::SealnoteError::TamperedProvider));

    // Restoring the original table clears the alarm: the live pointers
    // once again match the snapshot.
    provider::install(provider::ring_table());
    assert!(!provider::check());
    assert_eq!(session.login("user", &pw).await.unwrap(), "pre-tamper");
}
