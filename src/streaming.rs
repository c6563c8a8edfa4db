//! The public [`Hasher`]: orchestrates [`ChunkState`] and [`Accumulator`]
//! and implements the three hashing modes.

use crate::engine::accumulator::Accumulator;
use crate::engine::chunk::{ChunkState, OutputSeed};
use crate::engine::parallel::hash4_chunks;
use crate::kernels::constants::{
    CHUNK_LEN, DERIVE_KEY_CONTEXT, DERIVE_KEY_MATERIAL, IV, KEYED_HASH, PARENT, ROOT,
};
use crate::kernels::portable::compress;
use crate::output::OutputReader;
use crate::types::{Hash, InvalidKeyLengthError, OutputLengthError};

#[cfg(feature = "digest-trait")]
use crypto_common::{Key, KeySizeUser};
#[cfg(feature = "digest-trait")]
use digest::typenum::U32;
#[cfg(feature = "digest-trait")]
use digest::Output;
#[cfg(feature = "digest-trait")]
use digest::{FixedOutput, HashMarker, KeyInit, OutputSizeUser, Reset, Update};

fn words_from_le_bytes_32(bytes: &[u8; 32]) -> [u32; 8] {
    let mut words = [0u32; 8];
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    words
}

/// Number of full chunks batched per SIMD call.
const SIMD_BATCH_CHUNKS: usize = 4;

/// An incremental BLAKE3 hasher: plain hash, keyed MAC, or key-derivation
/// material, selected at construction.
///
/// `update` may be called any number of times with input of any length;
/// `finalize`/`finalize_xof` are read-only and may be called repeatedly,
/// including interleaved with further `update` calls (see DESIGN.md for the
/// reasoning behind this lifecycle choice).
#[derive(Clone, Debug)]
pub struct Hasher {
    chunk_state: ChunkState,
    accumulator: Accumulator,
    key_words: [u32; 8],
    mode_flags: u8,
    next_chunk_counter: u64,
    total_chunks: u64,
}

impl Hasher {
    fn new_with_key(key_words: [u32; 8], mode_flags: u8) -> Self {
        Self {
            chunk_state: ChunkState::new(key_words, 0, mode_flags),
            accumulator: Accumulator::new(key_words, mode_flags),
            key_words,
            mode_flags,
            next_chunk_counter: 0,
            total_chunks: 0,
        }
    }

    /// A plain (unkeyed) hasher.
    #[must_use]
    pub fn new() -> Self {
        Self::new_with_key(IV, 0)
    }

    /// A keyed-MAC hasher. `key` must be exactly 32 bytes.
    ///
    /// # Errors
    /// Returns [`InvalidKeyLengthError`] if `key.len() != 32`.
    pub fn new_keyed(key: &[u8]) -> Result<Self, InvalidKeyLengthError> {
        if key.len() != 32 {
            return Err(InvalidKeyLengthError::new(key.len()));
        }
        let mut key_bytes = [0u8; 32];
        key_bytes.copy_from_slice(key);
        Ok(Self::new_with_key(
            words_from_le_bytes_32(&key_bytes),
            KEYED_HASH,
        ))
    }

    /// A key-derivation hasher, seeded from an arbitrary context string. Feed
    /// key material into the returned hasher with [`update`](Self::update),
    /// then finalize.
    #[must_use]
    pub fn new_derive_key(context: &[u8]) -> Self {
        let mut context_hasher = Self::new_with_key(IV, DERIVE_KEY_CONTEXT);
        context_hasher.update(context);
        let context_key = context_hasher.finalize();
        Self::new_with_key(
            words_from_le_bytes_32(context_key.as_bytes()),
            DERIVE_KEY_MATERIAL,
        )
    }

    /// Feed more input bytes. May be called any number of times.
    pub fn update(&mut self, mut input: &[u8]) -> &mut Self {
        while !input.is_empty() {
            if self.chunk_state.len() == 0 {
                let batch_bytes = CHUNK_LEN * SIMD_BATCH_CHUNKS;
                if input.len() > batch_bytes {
                    // Only take the fast path when a full batch is available
                    // *and* there is still more input after it — otherwise
                    // we can't tell yet whether the last chunk in the batch
                    // is actually the final (possibly root) chunk.
                    let groups = (input.len() - 1) / batch_bytes;
                    for _ in 0..groups {
                        let chunks = [
                            &input[0..CHUNK_LEN],
                            &input[CHUNK_LEN..2 * CHUNK_LEN],
                            &input[2 * CHUNK_LEN..3 * CHUNK_LEN],
                            &input[3 * CHUNK_LEN..4 * CHUNK_LEN],
                        ];
                        let base = self.next_chunk_counter;
                        let counters = [base, base + 1, base + 2, base + 3];
                        let cvs = hash4_chunks(chunks, self.key_words, counters, self.mode_flags);
                        for cv in cvs {
                            self.total_chunks += 1;
                            self.accumulator.push(cv, self.total_chunks);
                        }
                        self.next_chunk_counter += SIMD_BATCH_CHUNKS as u64;
                        input = &input[batch_bytes..];
                    }
                    self.chunk_state =
                        ChunkState::new(self.key_words, self.next_chunk_counter, self.mode_flags);
                    continue;
                }
            }

            let take = self.chunk_state.capacity_remaining().min(input.len());
            self.chunk_state.update(&input[..take]);
            input = &input[take..];

            // Only roll the chunk over once we know more input is coming —
            // a chunk that reaches exactly CHUNK_LEN bytes right at EOF must
            // stay open, since finalize() needs to know whether it is root.
            if self.chunk_state.len() == CHUNK_LEN && !input.is_empty() {
                self.total_chunks += 1;
                let cv = self.chunk_state.cv();
                self.accumulator.push(cv, self.total_chunks);
                self.next_chunk_counter += 1;
                self.chunk_state =
                    ChunkState::new(self.key_words, self.next_chunk_counter, self.mode_flags);
            }
        }
        self
    }

    /// The `(cv, block, counter, block_len, flags)` tuple that, compressed
    /// with `ROOT` set, produces the digest.
    fn root_seed(&self) -> OutputSeed {
        if self.accumulator.is_empty() {
            let mut seed = self.chunk_state.output_seed();
            seed.flags |= ROOT;
            seed
        } else {
            let final_cv = self.chunk_state.cv();
            let (left, right) = self.accumulator.root_pair(final_cv);
            let mut block_words = [0u32; 16];
            block_words[0..8].copy_from_slice(&left);
            block_words[8..16].copy_from_slice(&right);
            OutputSeed {
                cv: self.key_words,
                block_words,
                counter: 0,
                block_len: 64,
                flags: self.mode_flags | PARENT | ROOT,
            }
        }
    }

    /// Finalize to the default 32-byte digest. Read-only.
    #[must_use]
    pub fn finalize(&self) -> Hash {
        let seed = self.root_seed();
        let out = compress(&seed.cv, &seed.block_words, seed.counter, seed.block_len, seed.flags);
        let mut bytes = [0u8; 32];
        for (word, chunk) in out[0..8].iter().zip(bytes.chunks_exact_mut(4)) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        Hash::from(bytes)
    }

    /// Finalize to an arbitrary-length output stream.
    #[must_use]
    pub fn finalize_xof(&self) -> OutputReader {
        OutputReader::new(self.root_seed())
    }

    /// Finalize into a caller-provided buffer, writing exactly `out_len`
    /// bytes.
    ///
    /// # Errors
    /// Returns [`OutputLengthError`] if `buf.len() < out_len`.
    pub fn finalize_into(&self, buf: &mut [u8], out_len: usize) -> Result<(), OutputLengthError> {
        if buf.len() < out_len {
            return Err(OutputLengthError::new(out_len, buf.len()));
        }
        let mut reader = self.finalize_xof();
        reader.fill(&mut buf[..out_len]);
        Ok(())
    }

    /// Finalize to a heap-allocated buffer of `out_len` bytes.
    #[cfg(feature = "std")]
    #[must_use]
    pub fn finalize_variable(&self, out_len: usize) -> std::vec::Vec<u8> {
        let mut buf = std::vec![0u8; out_len];
        let mut reader = self.finalize_xof();
        reader.fill(&mut buf);
        buf
    }

    /// Number of full chunks this hasher has completed and rolled past so
    /// far (the counter the next chunk, if any, will be compressed with).
    #[must_use]
    pub fn chunk_counter(&self) -> u64 {
        self.next_chunk_counter
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// `digest` TRAIT INTEGRATION
// =============================================================================

#[cfg(feature = "digest-trait")]
impl OutputSizeUser for Hasher {
    type OutputSize = U32;
}

#[cfg(feature = "digest-trait")]
impl KeySizeUser for Hasher {
    type KeySize = U32;
}

#[cfg(feature = "digest-trait")]
impl Update for Hasher {
    fn update(&mut self, data: &[u8]) {
        Hasher::update(self, data);
    }
}

#[cfg(feature = "digest-trait")]
impl FixedOutput for Hasher {
    fn finalize_into(self, out: &mut Output<Self>) {
        out.copy_from_slice(Hasher::finalize(&self).as_bytes());
    }
}

#[cfg(feature = "digest-trait")]
impl Reset for Hasher {
    fn reset(&mut self) {
        *self = Self::new_with_key(self.key_words, self.mode_flags);
    }
}

#[cfg(feature = "digest-trait")]
impl HashMarker for Hasher {}

#[cfg(feature = "digest-trait")]
impl KeyInit for Hasher {
    fn new(key: &Key<Self>) -> Self {
        Self::new_with_key(words_from_le_bytes_32(key.as_slice().try_into().expect(
            "KeySize is statically U32, so `key` is always exactly 32 bytes",
        )), KEYED_HASH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(len: usize) -> std::vec::Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn empty_input_is_deterministic() {
        let a = Hasher::new().finalize();
        let b = Hasher::new().finalize();
        assert_eq!(a, b);
    }

    #[test]
    fn update_is_associative_over_concatenation() {
        let data = pattern(5000);
        for split in [0, 1, 1023, 1024, 1025, 2048, 3333, 4999, 5000] {
            let (a, b) = data.split_at(split);
            let mut streamed = Hasher::new();
            streamed.update(a);
            streamed.update(b);

            let mut one_shot = Hasher::new();
            one_shot.update(&data);

            assert_eq!(streamed.finalize(), one_shot.finalize(), "split at {split}");
        }
    }

    #[test]
    fn byte_by_byte_matches_one_shot() {
        let data = pattern(2050);
        let mut byte_wise = Hasher::new();
        for b in &data {
            byte_wise.update(core::slice::from_ref(b));
        }
        let mut one_shot = Hasher::new();
        one_shot.update(&data);
        assert_eq!(byte_wise.finalize(), one_shot.finalize());
    }

    #[test]
    fn finalize_does_not_disturb_further_updates() {
        let mut hasher = Hasher::new();
        hasher.update(b"hello");
        let _ = hasher.finalize();
        let _ = hasher.finalize_xof();
        hasher.update(b" world");

        let mut reference = Hasher::new();
        reference.update(b"hello world");

        assert_eq!(hasher.finalize(), reference.finalize());
    }

    #[test]
    fn keyed_and_plain_hashes_differ() {
        let data = b"same input, different mode";
        let plain = {
            let mut h = Hasher::new();
            h.update(data);
            h.finalize()
        };
        let keyed = {
            let mut h = Hasher::new_keyed(&[0x11u8; 32]).unwrap();
            h.update(data);
            h.finalize()
        };
        assert_ne!(plain, keyed);
    }

    #[test]
    fn rejects_wrong_length_keys() {
        assert!(Hasher::new_keyed(&[0u8; 31]).is_err());
        assert!(Hasher::new_keyed(&[0u8; 33]).is_err());
        assert!(Hasher::new_keyed(&[0u8; 32]).is_ok());
    }

    #[test]
    fn derive_key_is_deterministic_and_context_separated() {
        let material = b"key material";
        let mut a = Hasher::new_derive_key(b"context A");
        a.update(material);
        let mut b = Hasher::new_derive_key(b"context A");
        b.update(material);
        let mut c = Hasher::new_derive_key(b"context B");
        c.update(material);

        assert_eq!(a.finalize(), b.finalize());
        assert_ne!(a.finalize(), c.finalize());
    }

    #[test]
    fn finalize_matches_first_bytes_of_xof() {
        let mut hasher = Hasher::new();
        hasher.update(&pattern(9000));

        let digest = hasher.finalize();
        let mut xof_bytes = [0u8; 32];
        hasher.finalize_xof().fill(&mut xof_bytes);

        assert_eq!(digest.as_bytes(), &xof_bytes);
    }

    #[test]
    fn finalize_into_rejects_short_buffers() {
        let hasher = Hasher::new();
        let mut buf = [0u8; 10];
        assert!(hasher.finalize_into(&mut buf, 20).is_err());
        assert!(hasher.finalize_into(&mut buf, 10).is_ok());
    }

    #[test]
    fn power_of_two_boundaries_match_one_shot_bytewise() {
        for exp in 0..=20 {
            let len = 1usize << exp;
            let data = pattern(len);
            let mut a = Hasher::new();
            a.update(&data);
            let mid = len / 2;
            let mut b = Hasher::new();
            b.update(&data[..mid]);
            b.update(&data[mid..]);
            assert_eq!(a.finalize(), b.finalize(), "len {len}");
        }
    }
}
