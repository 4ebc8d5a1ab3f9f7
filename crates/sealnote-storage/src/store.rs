// SPDX-FileCopyrightText: 2026 Sealnote Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the [`RecordStore`] contract.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sealnote_config::StorageConfig;
use sealnote_core::{KeyGenRecord, PayloadRecord, RecordStore, SealnoteError};
use tracing::info;

use crate::database::Database;
use crate::queries;

/// SQLite-backed record store.
///
/// Read-your-writes and write serialization follow from the single
/// tokio-rusqlite connection: every operation runs on one background
/// thread in call order.
pub struct SqliteRecordStore {
    db: Option<Database>,
    path: PathBuf,
}

impl SqliteRecordStore {
    /// Open or create the store at the configured path, creating the
    /// schema and seeding the singleton records on first run.
    pub async fn open(config: &StorageConfig) -> Result<Self, SealnoteError> {
        let db = Database::open(&config.database_path, config.wal_mode).await?;
        Ok(Self {
            db: Some(db),
            path: PathBuf::from(&config.database_path),
        })
    }

    /// Whether a store exists at `path` without opening it.
    ///
    /// Used by the presentation layer to decide between "log in" and
    /// "create account" wording before any password is asked for.
    pub fn store_exists(path: impl AsRef<Path>) -> bool {
        path.as_ref().exists()
    }

    fn db(&self) -> Result<&Database, SealnoteError> {
        self.db.as_ref().ok_or_else(|| SealnoteError::StoreUnavailable {
            source: "store has been destroyed".into(),
        })
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn key_gen(&self) -> Result<KeyGenRecord, SealnoteError> {
        queries::get_key_gen(self.db()?).await
    }

    async fn put_key_gen(&self, record: &KeyGenRecord) -> Result<(), SealnoteError> {
        queries::put_key_gen(self.db()?, record).await
    }

    async fn payload(&self) -> Result<PayloadRecord, SealnoteError> {
        queries::get_payload(self.db()?).await
    }

    async fn put_payload(&self, record: &PayloadRecord) -> Result<(), SealnoteError> {
        queries::put_payload(self.db()?, record).await
    }

    async fn exists(&self) -> bool {
        self.db.is_some() && self.path.exists()
    }

    async fn destroy(&mut self) -> Result<(), SealnoteError> {
        let Some(db) = self.db.take() else {
            return Err(SealnoteError::StoreUnavailable {
                source: "store has already been destroyed".into(),
            });
        };

        // Fold the WAL back into the main file so removing the three
        // sqlite files leaves nothing behind.
        db.checkpoint().await?;
        drop(db);

        let base = self.path.as_os_str().to_os_string();
        for suffix in ["", "-wal", "-shm"] {
            let mut os = base.clone();
            os.push(suffix);
            match std::fs::remove_file(PathBuf::from(os)) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(SealnoteError::StoreUnavailable {
                        source: Box::new(e),
                    });
                }
            }
        }

        info!(path = %self.path.display(), "record store destroyed");
        Ok(())
    }
}
