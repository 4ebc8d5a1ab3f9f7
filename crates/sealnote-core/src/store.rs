// SPDX-FileCopyrightText: 2026 Sealnote Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The record-store contract consumed by the crypto pipeline.
//!
//! The key-derivation and encryption services only ever need the
//! record-level operations below; the persistence engine behind them is
//! an implementation detail (`sealnote-storage` provides the SQLite one).
//!
//! Implementations must guarantee:
//! - a `put` is visible to the next `get` on the same handle
//!   (read-your-writes);
//! - concurrent puts to the same record are serialized (last writer wins
//!   is acceptable -- the core never issues concurrent writes to the same
//!   record);
//! - after `destroy`, `exists()` reports false and record operations fail
//!   with [`SealnoteError::StoreUnavailable`].

use async_trait::async_trait;

use crate::error::SealnoteError;
use crate::records::{KeyGenRecord, PayloadRecord};

/// A persistent store holding exactly one [`KeyGenRecord`] and one
/// [`PayloadRecord`].
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Read the key-generation record.
    async fn key_gen(&self) -> Result<KeyGenRecord, SealnoteError>;

    /// Replace the key-generation record.
    async fn put_key_gen(&self, record: &KeyGenRecord) -> Result<(), SealnoteError>;

    /// Read the payload record.
    async fn payload(&self) -> Result<PayloadRecord, SealnoteError>;

    /// Replace the payload record. The whole encrypted blob is written
    /// atomically; there is no partial update.
    async fn put_payload(&self, record: &PayloadRecord) -> Result<(), SealnoteError>;

    /// Whether the store still exists on its backing medium.
    async fn exists(&self) -> bool;

    /// Irrecoverably wipe all records. The handle is unusable afterwards.
    async fn destroy(&mut self) -> Result<(), SealnoteError>;
}
