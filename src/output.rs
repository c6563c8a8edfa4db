//! Extendable-output (XOF) reader.
//!
//! A stateless-per-read, seekable stream of output bytes: logical offset `o`
//! is always the `(o mod 64)`-th byte of the extended (16-word) output
//! produced by re-compressing the root seed with `counter = o / 64`.

use crate::engine::chunk::OutputSeed;
use crate::kernels::constants::ROOT;
use crate::kernels::portable::{compress, le_bytes_from_words};

/// Streams arbitrarily many output bytes from a finalized root seed.
///
/// Cheap to clone and to construct repeatedly from the same `Hasher` —
/// `finalize`/`finalize_xof` are read-only, so nothing here prevents calling
/// `Hasher::finalize_xof()` more than once.
#[derive(Clone, Debug)]
pub struct OutputReader {
    seed: OutputSeed,
    next_counter: u64,
    block: [u8; 64],
    /// Number of valid, not-yet-consumed bytes at the front of `block`,
    /// starting at `offset`. Zero means the buffer must be refilled before
    /// the next byte can be served.
    valid_from: usize,
}

impl OutputReader {
    pub(crate) fn new(mut seed: OutputSeed) -> Self {
        seed.flags |= ROOT;
        Self {
            seed,
            next_counter: 0,
            block: [0u8; 64],
            valid_from: 64,
        }
    }

    fn refill(&mut self) {
        let out = compress(
            &self.seed.cv,
            &self.seed.block_words,
            self.next_counter,
            self.seed.block_len,
            self.seed.flags,
        );
        le_bytes_from_words(&out, &mut self.block);
        self.next_counter += 1;
        self.valid_from = 0;
    }

    /// Fill `buf` completely with the next `buf.len()` output bytes.
    pub fn fill(&mut self, mut buf: &mut [u8]) {
        while !buf.is_empty() {
            if self.valid_from == 64 {
                self.refill();
            }
            let available = 64 - self.valid_from;
            let take = available.min(buf.len());
            buf[..take].copy_from_slice(&self.block[self.valid_from..self.valid_from + take]);
            self.valid_from += take;
            buf = &mut buf[take..];
        }
    }

    /// Seek the stream to logical byte offset `position`. The next [`fill`]
    /// call serves bytes starting there.
    ///
    /// [`fill`]: Self::fill
    pub fn set_position(&mut self, position: u64) {
        self.next_counter = position / 64;
        self.refill();
        self.valid_from = (position % 64) as usize;
    }
}
