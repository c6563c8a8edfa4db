#![cfg_attr(not(feature = "std"), no_std)]

//! A BLAKE3 cryptographic hash engine: the compression function, the
//! per-chunk block pipeline, the Merkle subtree accumulator, and the
//! extendable-output reader.
//!
//! BLAKE3 produces a variable-length digest (default 32 bytes) from
//! arbitrary byte input in three modes — plain hashing, keyed MAC, and
//! context-separated key derivation.
//!
//! # Usage
//! ```rust
//! use blake3_engine::Hasher;
//!
//! let mut hasher = Hasher::new();
//! hasher.update(b"Chunk 1");
//! hasher.update(b"Chunk 2");
//! let hash = hasher.finalize();
//! println!("{hash}");
//!
//! assert_eq!(hash, blake3_engine::hash(b"Chunk 1Chunk 2"));
//! ```

#[cfg(not(feature = "std"))]
extern crate alloc;

mod engine;
#[doc(hidden)]
pub mod kernels; // Public for test/fuzz use only; not part of the stable API.
mod oneshot;
mod output;
mod streaming;
mod types;

// =============================================================================
// EXPORTS
// =============================================================================

#[cfg(feature = "digest-trait")]
pub use digest;
pub use oneshot::{derive_key, hash, keyed_hash, verify};
pub use output::OutputReader;
pub use streaming::Hasher;
pub use types::{Hash, InvalidKeyLengthError, OutputLengthError};

/// Name of the compression backend in use on this target (diagnostics only).
#[must_use]
pub fn active_backend() -> &'static str {
    engine::active_backend_name()
}
