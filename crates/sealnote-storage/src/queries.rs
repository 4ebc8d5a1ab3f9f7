// SPDX-FileCopyrightText: 2026 Sealnote Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed read/write operations for the two singleton records.
//!
//! Each record lives in its own table as a single row at id 1, seeded by
//! the initial migration, so `get` always finds a row and `put` is an
//! upsert that replaces the stored value whole.

use rusqlite::params;
use sealnote_core::{KeyGenRecord, PayloadRecord, SINGLETON_RECORD_ID, SealnoteError};
use tracing::debug;

use crate::database::{Database, map_tr_err};

/// Read the key-generation record.
pub async fn get_key_gen(db: &Database) -> Result<KeyGenRecord, SealnoteError> {
    db.connection()
        .call(|conn| -> Result<KeyGenRecord, rusqlite::Error> {
            conn.query_row(
                "SELECT id, derive_key_salt FROM key_gen WHERE id = ?1",
                params![SINGLETON_RECORD_ID],
                |row| {
                    Ok(KeyGenRecord {
                        id: row.get(0)?,
                        derive_key_salt: row.get(1)?,
                    })
                },
            )
        })
        .await
        .map_err(map_tr_err)
}

/// Replace the key-generation record.
pub async fn put_key_gen(db: &Database, record: &KeyGenRecord) -> Result<(), SealnoteError> {
    let id = record.id;
    let salt = record.derive_key_salt.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO key_gen (id, derive_key_salt) VALUES (?1, ?2)
                 ON CONFLICT (id) DO UPDATE SET derive_key_salt = excluded.derive_key_salt",
                params![id, salt],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;
    debug!("key-gen record updated");
    Ok(())
}

/// Read the payload record.
pub async fn get_payload(db: &Database) -> Result<PayloadRecord, SealnoteError> {
    db.connection()
        .call(|conn| -> Result<PayloadRecord, rusqlite::Error> {
            conn.query_row(
                "SELECT id, sensitive_data FROM app_data WHERE id = ?1",
                params![SINGLETON_RECORD_ID],
                |row| {
                    Ok(PayloadRecord {
                        id: row.get(0)?,
                        sensitive_data: row.get(1)?,
                    })
                },
            )
        })
        .await
        .map_err(map_tr_err)
}

/// Replace the payload record. The blob is written in one statement; a
/// reader never observes a partial payload.
pub async fn put_payload(db: &Database, record: &PayloadRecord) -> Result<(), SealnoteError> {
    let id = record.id;
    let data = record.sensitive_data.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO app_data (id, sensitive_data) VALUES (?1, ?2)
                 ON CONFLICT (id) DO UPDATE SET sensitive_data = excluded.sensitive_data",
                params![id, data],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;
    debug!("payload record updated");
    Ok(())
}
