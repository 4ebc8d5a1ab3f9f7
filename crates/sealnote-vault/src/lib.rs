// SPDX-FileCopyrightText: 2026 Sealnote Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Password-derived-key encryption pipeline for Sealnote.
//!
//! A password plus a stored salt derives a 128-bit credential key
//! (PBKDF2-HMAC-SHA256); the key seals the single sensitive payload with
//! AES-128-GCM under a fresh nonce per write. A provider integrity guard
//! snapshots the crypto primitives at startup and refuses to operate if
//! they are later swapped out. The [`Session`] state machine sequences
//! login, save, password change, logout, and wipe over a record store.

pub mod crypto;
pub mod kdf;
pub mod prompt;
pub mod provider;
pub mod session;

pub use kdf::CredentialKey;
pub use prompt::{get_new_password_with_confirm, get_password};
pub use session::Session;
