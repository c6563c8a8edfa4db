//! Portable scalar implementation of the BLAKE3 compression function.
//!
//! This is the normative reference: every other kernel (SIMD included) must
//! be bit-exact with what this module computes. No `unsafe`, no
//! platform-specific intrinsics.

use crate::kernels::constants::{BLOCK_LEN, IV, MSG_SCHEDULE, ROUNDS};

// =============================================================================
// MIXING FUNCTION
// =============================================================================

/// The `G` mixing function, applied 8 times per round (4 column, 4 diagonal).
#[inline(always)]
fn g(state: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize, mx: u32, my: u32) {
    state[a] = state[a].wrapping_add(state[b]).wrapping_add(mx);
    state[d] = (state[d] ^ state[a]).rotate_right(16);
    state[c] = state[c].wrapping_add(state[d]);
    state[b] = (state[b] ^ state[c]).rotate_right(12);
    state[a] = state[a].wrapping_add(state[b]).wrapping_add(my);
    state[d] = (state[d] ^ state[a]).rotate_right(8);
    state[c] = state[c].wrapping_add(state[d]);
    state[b] = (state[b] ^ state[c]).rotate_right(7);
}

#[inline(always)]
fn round(state: &mut [u32; 16], msg: &[u32; 16], schedule: &[usize; 16]) {
    // Column step.
    g(state, 0, 4, 8, 12, msg[schedule[0]], msg[schedule[1]]);
    g(state, 1, 5, 9, 13, msg[schedule[2]], msg[schedule[3]]);
    g(state, 2, 6, 10, 14, msg[schedule[4]], msg[schedule[5]]);
    g(state, 3, 7, 11, 15, msg[schedule[6]], msg[schedule[7]]);
    // Diagonal step.
    g(state, 0, 5, 10, 15, msg[schedule[8]], msg[schedule[9]]);
    g(state, 1, 6, 11, 12, msg[schedule[10]], msg[schedule[11]]);
    g(state, 2, 7, 8, 13, msg[schedule[12]], msg[schedule[13]]);
    g(state, 3, 4, 9, 14, msg[schedule[14]], msg[schedule[15]]);
}

// =============================================================================
// COMPRESSION FUNCTION
// =============================================================================

/// Compress one 64-byte block, returning the full 16-word output.
///
/// `out[0..8]` is the standard chaining-value reduction; `out[8..16]` is only
/// needed by callers that want the extended output (root finalization, XOF).
#[must_use]
pub fn compress(
    cv: &[u32; 8],
    block_words: &[u32; 16],
    counter: u64,
    block_len: u32,
    flags: u8,
) -> [u32; 16] {
    let mut state = [0u32; 16];
    state[0..8].copy_from_slice(cv);
    state[8..12].copy_from_slice(&IV[0..4]);
    state[12] = counter as u32;
    state[13] = (counter >> 32) as u32;
    state[14] = block_len;
    state[15] = u32::from(flags);

    for schedule in MSG_SCHEDULE.iter().take(ROUNDS) {
        round(&mut state, block_words, schedule);
    }

    let mut out = [0u32; 16];
    for i in 0..8 {
        out[i] = state[i] ^ state[i + 8];
        out[i + 8] = state[i + 8] ^ cv[i];
    }
    out
}

/// Compress one block and keep only the 8-word chaining value.
#[must_use]
pub fn compress_cv(
    cv: &[u32; 8],
    block_words: &[u32; 16],
    counter: u64,
    block_len: u32,
    flags: u8,
) -> [u32; 8] {
    let full = compress(cv, block_words, counter, block_len, flags);
    let mut out = [0u32; 8];
    out.copy_from_slice(&full[0..8]);
    out
}

// =============================================================================
// BYTE / WORD CONVERSION
// =============================================================================

/// Load a (possibly short) block into 16 little-endian words, zero-padding
/// bytes beyond `block.len()`. The true byte count is carried separately as
/// `block_len` to the compression function — padding never changes a
/// compression's domain, only the literal bits mixed in.
#[must_use]
pub fn words_from_le_bytes_64(block: &[u8]) -> [u32; 16] {
    debug_assert!(block.len() <= BLOCK_LEN);
    let mut buf = [0u8; BLOCK_LEN];
    buf[..block.len()].copy_from_slice(block);
    let mut words = [0u32; 16];
    for (word, chunk) in words.iter_mut().zip(buf.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    words
}

/// Serialize words as little-endian bytes into `out`, stopping early if
/// `out` is shorter than `4 * words.len()`.
pub fn le_bytes_from_words(words: &[u32], out: &mut [u8]) {
    for (word, chunk) in words.iter().zip(out.chunks_mut(4)) {
        let bytes = word.to_le_bytes();
        let n = chunk.len();
        chunk.copy_from_slice(&bytes[..n]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::constants::{CHUNK_END, CHUNK_START, ROOT};

    #[test]
    fn empty_block_is_deterministic() {
        let block = words_from_le_bytes_64(&[]);
        let a = compress_cv(&IV, &block, 0, 0, CHUNK_START | CHUNK_END | ROOT);
        let b = compress_cv(&IV, &block, 0, 0, CHUNK_START | CHUNK_END | ROOT);
        assert_eq!(a, b);
    }

    #[test]
    fn different_flags_change_output() {
        let block = words_from_le_bytes_64(b"hello world, this is a test block of bytes!!!!!");
        let a = compress_cv(&IV, &block, 0, 48, CHUNK_START);
        let b = compress_cv(&IV, &block, 0, 48, CHUNK_START | CHUNK_END);
        assert_ne!(a, b);
    }

    #[test]
    fn different_counters_change_output() {
        let block = words_from_le_bytes_64(b"fixed content, fixed length, only counter moves");
        let a = compress_cv(&IV, &block, 0, 48, 0);
        let b = compress_cv(&IV, &block, 1, 48, 0);
        assert_ne!(a, b);
    }

    #[test]
    fn roundtrip_words_bytes() {
        let words = [0x1234_5678u32, 0xDEAD_BEEF, 0, u32::MAX];
        let mut bytes = [0u8; 16];
        le_bytes_from_words(&words, &mut bytes);
        let mut block = [0u8; 64];
        block[..16].copy_from_slice(&bytes);
        let back = words_from_le_bytes_64(&block);
        assert_eq!(&back[..4], &words);
    }
}
