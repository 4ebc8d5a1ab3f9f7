// SPDX-FileCopyrightText: 2026 Sealnote Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record types held by the singleton record store.
//!
//! The store holds exactly two records, one per table, both addressed by
//! the fixed id [`SINGLETON_RECORD_ID`]. Both are created empty when the
//! store is first initialized and are only ever replaced whole.

/// The fixed id of the single row in each record table.
pub const SINGLETON_RECORD_ID: i64 = 1;

/// Key-derivation parameters persisted across sessions.
///
/// Only the salt is stored; the iteration count and hash algorithm are
/// fixed in code. A new salt is generated on first login and on every
/// password change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyGenRecord {
    pub id: i64,
    /// 16 random bytes, absent until the first key derivation.
    pub derive_key_salt: Option<Vec<u8>>,
}

impl KeyGenRecord {
    /// The record as seeded by store initialization: no salt yet.
    pub fn empty() -> Self {
        Self {
            id: SINGLETON_RECORD_ID,
            derive_key_salt: None,
        }
    }
}

/// The encrypted application payload.
///
/// `sensitive_data` is the full wire blob (`nonce || ciphertext || tag`),
/// absent until the first save. A put replaces the whole blob; there are
/// no partial writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadRecord {
    pub id: i64,
    pub sensitive_data: Option<Vec<u8>>,
}

impl PayloadRecord {
    /// The record as seeded by store initialization: no payload yet.
    pub fn empty() -> Self {
        Self {
            id: SINGLETON_RECORD_ID,
            sensitive_data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_records_use_the_singleton_id() {
        assert_eq!(KeyGenRecord::empty().id, SINGLETON_RECORD_ID);
        assert_eq!(PayloadRecord::empty().id, SINGLETON_RECORD_ID);
        assert!(KeyGenRecord::empty().derive_key_salt.is_none());
        assert!(PayloadRecord::empty().sensitive_data.is_none());
    }
}
