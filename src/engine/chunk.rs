//! Chunk pipeline.
//!
//! Accumulates up to `CHUNK_LEN` bytes into 64-byte blocks and compresses
//! them one at a time, carrying the running chaining value forward between
//! blocks.

use crate::kernels::constants::{
    BLOCK_LEN, BLOCKS_PER_CHUNK, CHUNK_END, CHUNK_LEN, CHUNK_START, ROOT,
};
use crate::kernels::portable::{compress, compress_cv, words_from_le_bytes_64};

/// The (cv, block, counter, block_len, flags) tuple that root finalization
/// and the XOF reader both re-compress with increasing counters. Flags here
/// never include `ROOT` — callers OR it in when they know they are
/// finalizing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct OutputSeed {
    pub(crate) cv: [u32; 8],
    pub(crate) block_words: [u32; 16],
    pub(crate) counter: u64,
    pub(crate) block_len: u32,
    pub(crate) flags: u8,
}

/// Mutable per-chunk state: up to `CHUNK_LEN` (1024) bytes accumulated as
/// 64-byte blocks, with the running chaining value carried between them.
#[derive(Clone, Debug)]
pub(crate) struct ChunkState {
    chaining_value: [u32; 8],
    chunk_counter: u64,
    block: [u8; BLOCK_LEN],
    block_len: usize,
    blocks_compressed: u8,
    mode_flags: u8,
}

impl ChunkState {
    pub(crate) fn new(key_words: [u32; 8], chunk_counter: u64, mode_flags: u8) -> Self {
        Self {
            chaining_value: key_words,
            chunk_counter,
            block: [0u8; BLOCK_LEN],
            block_len: 0,
            blocks_compressed: 0,
            mode_flags,
        }
    }

    /// Total bytes ingested into this chunk so far (0..=`CHUNK_LEN`).
    pub(crate) fn len(&self) -> usize {
        usize::from(self.blocks_compressed) * BLOCK_LEN + self.block_len
    }

    /// Bytes this chunk can still accept before it is full.
    pub(crate) fn capacity_remaining(&self) -> usize {
        CHUNK_LEN - self.len()
    }

    fn start_flag(&self) -> u8 {
        if self.blocks_compressed == 0 {
            CHUNK_START
        } else {
            0
        }
    }

    /// Append bytes to the chunk. Must not be called with more bytes than
    /// `capacity_remaining()` — callers split at chunk boundaries.
    pub(crate) fn update(&mut self, mut input: &[u8]) {
        debug_assert!(input.len() <= self.capacity_remaining());
        while !input.is_empty() {
            if self.block_len == BLOCK_LEN {
                let block_words = words_from_le_bytes_64(&self.block);
                let flags = self.mode_flags | self.start_flag();
                self.chaining_value = compress_cv(
                    &self.chaining_value,
                    &block_words,
                    self.chunk_counter,
                    BLOCK_LEN as u32,
                    flags,
                );
                self.blocks_compressed += 1;
                self.block = [0u8; BLOCK_LEN];
                self.block_len = 0;
            }

            let want = BLOCK_LEN - self.block_len;
            let take = want.min(input.len());
            self.block[self.block_len..self.block_len + take].copy_from_slice(&input[..take]);
            self.block_len += take;
            input = &input[take..];
        }
    }

    fn final_flags(&self, is_root: bool) -> u8 {
        let mut flags = self.mode_flags | self.start_flag() | CHUNK_END;
        if is_root {
            flags |= ROOT;
        }
        flags
    }

    /// Compress the final (possibly partial) block and return the full
    /// 16-word output. Callers needing only the chaining value take
    /// `out[0..8]`; callers finalizing the whole hasher with `is_root` set
    /// use the full 16 words as the root's extended output.
    pub(crate) fn finalize(&self, is_root: bool) -> [u32; 16] {
        let block_words = words_from_le_bytes_64(&self.block[..self.block_len]);
        compress(
            &self.chaining_value,
            &block_words,
            self.chunk_counter,
            self.block_len as u32,
            self.final_flags(is_root),
        )
    }

    /// The non-root seed this chunk would finalize with, for handing off to
    /// the accumulator or the output reader. `ROOT` is added by the caller
    /// once it knows this is in fact the root.
    pub(crate) fn output_seed(&self) -> OutputSeed {
        OutputSeed {
            cv: self.chaining_value,
            block_words: words_from_le_bytes_64(&self.block[..self.block_len]),
            counter: self.chunk_counter,
            block_len: self.block_len as u32,
            flags: self.final_flags(false),
        }
    }

    pub(crate) fn chunk_counter(&self) -> u64 {
        self.chunk_counter
    }

    /// The non-root 8-word chaining value this chunk would finalize with.
    pub(crate) fn cv(&self) -> [u32; 8] {
        let mut out = [0u32; 8];
        out.copy_from_slice(&self.finalize(false)[0..8]);
        out
    }
}

/// Sanity constant for documentation/debug assertions: a full chunk is
/// exactly `BLOCKS_PER_CHUNK` 64-byte blocks.
#[allow(dead_code)]
const _: () = assert!(BLOCKS_PER_CHUNK * BLOCK_LEN == CHUNK_LEN);
