//! Four-chunk SIMD batch path.
//!
//! Given four full, aligned 1024-byte chunks, produce their four chaining
//! values by driving [`crate::kernels::simd128::compress4`] across all 16
//! block positions, amortizing the lane transpose over the whole batch. Only
//! ever called on full chunks — a chunk's last (possibly partial) block is
//! always handled by the scalar [`crate::engine::chunk::ChunkState`] path
//! instead.

use crate::kernels::constants::{BLOCKS_PER_CHUNK, CHUNK_END, CHUNK_LEN, CHUNK_START};
use crate::kernels::portable::words_from_le_bytes_64;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
use crate::kernels::simd128;

/// Compress four independent, full (`CHUNK_LEN`-byte) chunks, returning
/// their four chaining values in input order.
///
/// # Panics
/// In debug builds, if any `chunks[i]` is not exactly `CHUNK_LEN` bytes.
pub(crate) fn hash4_chunks(
    chunks: [&[u8]; 4],
    key_words: [u32; 8],
    counters: [u64; 4],
    mode_flags: u8,
) -> [[u32; 8]; 4] {
    for c in &chunks {
        debug_assert_eq!(c.len(), CHUNK_LEN);
    }

    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    if super::dispatcher::simd4_available() {
        return hash4_chunks_simd(chunks, key_words, counters, mode_flags);
    }

    hash4_chunks_scalar(chunks, key_words, counters, mode_flags)
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn hash4_chunks_simd(
    chunks: [&[u8]; 4],
    key_words: [u32; 8],
    counters: [u64; 4],
    mode_flags: u8,
) -> [[u32; 8]; 4] {
    let mut cvs = [key_words; 4];

    for block_idx in 0..BLOCKS_PER_CHUNK {
        let byte_start = block_idx * 64;
        let blocks: [[u32; 16]; 4] = core::array::from_fn(|lane| {
            words_from_le_bytes_64(&chunks[lane][byte_start..byte_start + 64])
        });

        let mut flags = mode_flags;
        if block_idx == 0 {
            flags |= CHUNK_START;
        }
        if block_idx == BLOCKS_PER_CHUNK - 1 {
            flags |= CHUNK_END;
        }

        // SAFETY: this function is only reachable when `simd4_available()`
        // returned true, which on `x86`/`x86_64` means SSE2 is present.
        cvs = unsafe {
            simd128::compress4(&cvs, &blocks, counters, [64u32; 4], [flags; 4])
        };
    }

    cvs
}

fn hash4_chunks_scalar(
    chunks: [&[u8]; 4],
    key_words: [u32; 8],
    counters: [u64; 4],
    mode_flags: u8,
) -> [[u32; 8]; 4] {
    core::array::from_fn(|lane| {
        let mut state = super::chunk::ChunkState::new(key_words, counters[lane], mode_flags);
        state.update(chunks[lane]);
        state.cv()
    })
}
