// SPDX-FileCopyrightText: 2026 Sealnote Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for Sealnote.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a
//! single-writer concurrency model via `tokio-rusqlite`, and the
//! [`SqliteRecordStore`] implementation of the record-store contract.

pub mod database;
pub mod migrations;
pub mod queries;
pub mod store;

pub use database::Database;
pub use store::SqliteRecordStore;
