//! Shared error and output types.

use core::fmt;
#[cfg(feature = "std")]
use std::error;

use subtle::ConstantTimeEq;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Keyed-mode construction was given a key whose length is not exactly 32
/// bytes. The only failure mode on the construction path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidKeyLengthError {
    got: usize,
}

impl InvalidKeyLengthError {
    pub(crate) const fn new(got: usize) -> Self {
        Self { got }
    }
}

impl fmt::Display for InvalidKeyLengthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "keyed hash requires a 32-byte key, got {} bytes", self.got)
    }
}

#[cfg(feature = "std")]
impl error::Error for InvalidKeyLengthError {}

/// The caller-provided output buffer is shorter than the requested output
/// length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputLengthError {
    requested: usize,
    available: usize,
}

impl OutputLengthError {
    pub(crate) const fn new(requested: usize, available: usize) -> Self {
        Self {
            requested,
            available,
        }
    }
}

impl fmt::Display for OutputLengthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "output buffer too small: requested {} bytes, buffer holds {}",
            self.requested, self.available
        )
    }
}

#[cfg(feature = "std")]
impl error::Error for OutputLengthError {}

// =============================================================================
// OUTPUT TYPE
// =============================================================================

/// A 32-byte digest.
///
/// Equality is constant-time (`subtle::ConstantTimeEq`) so that comparing a
/// computed digest against an expected one — the MAC-verification use case —
/// does not leak timing information about where the first mismatching byte
/// falls. It costs nothing on the hot compression path since it only applies
/// to the final comparison.
#[derive(Clone, Copy, Debug)]
pub struct Hash([u8; 32]);

impl Hash {
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for Hash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq for Hash {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for Hash {}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::LowerHex for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_hashes_compare_equal() {
        let a = Hash::from([7u8; 32]);
        let b = Hash::from([7u8; 32]);
        assert_eq!(a, b);
    }

    #[test]
    fn differing_hashes_compare_unequal() {
        let a = Hash::from([7u8; 32]);
        let mut bytes = [7u8; 32];
        bytes[31] ^= 1;
        let b = Hash::from(bytes);
        assert_ne!(a, b);
    }

    #[test]
    fn display_is_lowercase_hex() {
        let h = Hash::from([0xAB, 0xCD, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xFF]);
        let s = h.to_string();
        assert!(s.starts_with("abcd"));
        assert!(s.ends_with("ff"));
        assert_eq!(s.len(), 64);
    }
}
