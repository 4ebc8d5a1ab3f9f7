// SPDX-FileCopyrightText: 2026 Sealnote Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Sealnote.
//!
//! This crate provides the error type, the singleton record types, and the
//! record-store contract shared by the storage backend and the crypto
//! pipeline.

pub mod error;
pub mod records;
pub mod store;

// Re-export key items at crate root for ergonomic imports.
pub use error::SealnoteError;
pub use records::{KeyGenRecord, PayloadRecord, SINGLETON_RECORD_ID};
pub use store::RecordStore;
