//! Thin one-shot convenience wrappers over [`Hasher`].
//!
//! Deliberately minimal — a few lines each, consuming the `Hasher` interface
//! directly rather than growing into a subsystem of its own.

use crate::types::InvalidKeyLengthError;
use crate::{Hash, Hasher};

/// Hash `input` with the default (unkeyed) mode.
#[must_use]
pub fn hash(input: &[u8]) -> Hash {
    let mut hasher = Hasher::new();
    hasher.update(input);
    hasher.finalize()
}

/// Compute a keyed MAC over `input`. `key` must be exactly 32 bytes.
///
/// # Errors
/// Returns [`InvalidKeyLengthError`] if `key.len() != 32`.
pub fn keyed_hash(key: &[u8], input: &[u8]) -> Result<Hash, InvalidKeyLengthError> {
    let mut hasher = Hasher::new_keyed(key)?;
    hasher.update(input);
    Ok(hasher.finalize())
}

/// Derive a 32-byte key from `context` and `key_material`.
#[must_use]
pub fn derive_key(context: &[u8], key_material: &[u8]) -> Hash {
    let mut hasher = Hasher::new_derive_key(context);
    hasher.update(key_material);
    hasher.finalize()
}

/// Constant-time comparison of `data`'s hash against `expected`.
#[must_use]
pub fn verify(data: &[u8], expected: &Hash) -> bool {
    hash(data) == *expected
}
