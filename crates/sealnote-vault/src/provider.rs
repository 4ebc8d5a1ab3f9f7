// SPDX-FileCopyrightText: 2026 Sealnote Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Crypto provider table and integrity guard.
//!
//! The five primitives the pipeline depends on (key derivation, key
//! import, encrypt, decrypt, random bytes) are reached through a
//! process-wide table of function pointers. [`snapshot`] captures the
//! table once at startup; [`check`] reports whether any live entry has
//! since been replaced, and every crypto entry point refuses to run when
//! it has. This is a best-effort integrity signal against provider
//! substitution after load, not a cryptographic guarantee.

use std::num::NonZeroU32;
use std::ptr::fn_addr_eq;
use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;
use ring::aead::{AES_128_GCM, Aad, LessSafeKey, Nonce, UnboundKey};
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use sealnote_core::SealnoteError;
use tracing::warn;

/// Credential key length in bytes (AES-128-GCM).
pub const KEY_LEN: usize = 16;

/// Nonce length in bytes (96-bit GCM nonce).
pub const NONCE_LEN: usize = 12;

pub type DeriveKeyFn = fn(password: &[u8], salt: &[u8], iterations: NonZeroU32, out: &mut [u8]);
pub type ImportKeyFn = fn(raw: &[u8; KEY_LEN]) -> Result<LessSafeKey, SealnoteError>;
pub type EncryptFn =
    fn(key: &LessSafeKey, nonce: [u8; NONCE_LEN], in_out: &mut Vec<u8>) -> Result<(), SealnoteError>;
pub type DecryptFn =
    fn(key: &LessSafeKey, nonce: [u8; NONCE_LEN], in_out: &mut Vec<u8>) -> Result<usize, SealnoteError>;
pub type RandomBytesFn = fn(out: &mut [u8]) -> Result<(), SealnoteError>;

/// The set of crypto primitives in use by the pipeline.
#[derive(Clone, Copy)]
pub struct ProviderTable {
    pub derive_key: DeriveKeyFn,
    pub import_key: ImportKeyFn,
    pub encrypt: EncryptFn,
    pub decrypt: DecryptFn,
    pub random_bytes: RandomBytesFn,
}

fn ring_derive_key(password: &[u8], salt: &[u8], iterations: NonZeroU32, out: &mut [u8]) {
    pbkdf2::derive(pbkdf2::PBKDF2_HMAC_SHA256, iterations, salt, password, out);
}

fn ring_import_key(raw: &[u8; KEY_LEN]) -> Result<LessSafeKey, SealnoteError> {
    UnboundKey::new(&AES_128_GCM, raw)
        .map(LessSafeKey::new)
        .map_err(|_| SealnoteError::Crypto("failed to import AES-128-GCM key".to_string()))
}

fn ring_encrypt(
    key: &LessSafeKey,
    nonce: [u8; NONCE_LEN],
    in_out: &mut Vec<u8>,
) -> Result<(), SealnoteError> {
    key.seal_in_place_append_tag(Nonce::assume_unique_for_key(nonce), Aad::empty(), in_out)
        .map_err(|_| SealnoteError::Crypto("AES-128-GCM encryption failed".to_string()))
}

fn ring_decrypt(
    key: &LessSafeKey,
    nonce: [u8; NONCE_LEN],
    in_out: &mut Vec<u8>,
) -> Result<usize, SealnoteError> {
    let plaintext = key
        .open_in_place(Nonce::assume_unique_for_key(nonce), Aad::empty(), in_out)
        .map_err(|_| SealnoteError::DecryptionFailed)?;
    Ok(plaintext.len())
}

fn ring_random_bytes(out: &mut [u8]) -> Result<(), SealnoteError> {
    SystemRandom::new()
        .fill(out)
        .map_err(|_| SealnoteError::Crypto("system CSPRNG failure".to_string()))
}

/// The default provider table, backed by ring.
pub fn ring_table() -> ProviderTable {
    ProviderTable {
        derive_key: ring_derive_key,
        import_key: ring_import_key,
        encrypt: ring_encrypt,
        decrypt: ring_decrypt,
        random_bytes: ring_random_bytes,
    }
}

static LIVE: OnceLock<ArcSwap<ProviderTable>> = OnceLock::new();
static SNAPSHOT: OnceLock<ProviderTable> = OnceLock::new();

fn live() -> &'static ArcSwap<ProviderTable> {
    LIVE.get_or_init(|| ArcSwap::from_pointee(ring_table()))
}

/// Replace the live provider table.
///
/// Intended for alternative crypto backends and must happen before
/// [`snapshot`] is taken; any later swap is exactly what the guard
/// detects.
pub fn install(table: ProviderTable) {
    live().store(Arc::new(table));
}

/// Capture the live table's function pointers as the trusted reference.
///
/// Called once at process start. Idempotent; taken lazily on the first
/// crypto operation if the binary never called it. The captured pointers
/// themselves cannot be reassigned afterwards.
pub fn snapshot() {
    SNAPSHOT.get_or_init(|| **live().load());
}

/// Returns true when any live primitive differs from the snapshot.
pub fn check() -> bool {
    let Some(snap) = SNAPSHOT.get() else {
        return false;
    };
    let live = live().load();
    !(fn_addr_eq(snap.derive_key, live.derive_key)
        && fn_addr_eq(snap.import_key, live.import_key)
        && fn_addr_eq(snap.encrypt, live.encrypt)
        && fn_addr_eq(snap.decrypt, live.decrypt)
        && fn_addr_eq(snap.random_bytes, live.random_bytes))
}

/// Guard entry point used by every crypto operation: fails fast with
/// [`SealnoteError::TamperedProvider`] when the live table no longer
/// matches the snapshot, and otherwise returns the trusted table.
pub(crate) fn checked() -> Result<ProviderTable, SealnoteError> {
    snapshot();
    if check() {
        warn!("live crypto provider differs from the startup snapshot");
        return Err(SealnoteError::TamperedProvider);
    }
    match SNAPSHOT.get() {
        Some(table) => Ok(*table),
        None => Err(SealnoteError::Internal(
            "provider snapshot missing after initialization".to_string(),
        )),
    }
}
