//! 4-way SIMD compression kernel.
//!
//! Applies the same 7-round compression to four independent `(cv, block,
//! counter, block_len, flags)` tuples at once by packing one lane of each
//! 32-bit state word across the four tuples into a 128-bit SSE register.
//! Bit-exact with four sequential calls to
//! [`crate::kernels::portable::compress_cv`] — that is the only contract
//! that matters; this module exists purely for throughput.
//!
//! x86_64 guarantees SSE2, so this kernel needs no runtime feature probe on
//! that target; it is simply not compiled on other architectures, where the
//! portable scalar kernel (called four times) is used instead.

#![cfg(any(target_arch = "x86", target_arch = "x86_64"))]

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use crate::kernels::constants::{IV, MSG_SCHEDULE, ROUNDS};

// =============================================================================
// LANE TRANSPOSE
// =============================================================================

/// Transpose four rows of 4 lanes each: `out[i]` ends up holding
/// `row[0][i], row[1][i], row[2][i], row[3][i]` in lanes 0..4.
/// Standard SSE2 4x4 transpose via unpack; self-inverse.
// SAFETY: requires SSE2, which is always available on `x86_64` and is
// additionally guarded by `#[target_feature(enable = "sse2")]` on every
// caller in this module.
#[target_feature(enable = "sse2")]
#[allow(unsafe_code)]
unsafe fn transpose4(r0: __m128i, r1: __m128i, r2: __m128i, r3: __m128i) -> [__m128i; 4] {
    let t0 = _mm_unpacklo_epi32(r0, r1);
    let t1 = _mm_unpacklo_epi32(r2, r3);
    let t2 = _mm_unpackhi_epi32(r0, r1);
    let t3 = _mm_unpackhi_epi32(r2, r3);
    [
        _mm_unpacklo_epi64(t0, t1),
        _mm_unpackhi_epi64(t0, t1),
        _mm_unpacklo_epi64(t2, t3),
        _mm_unpackhi_epi64(t2, t3),
    ]
}

// SAFETY: see `transpose4`.
#[target_feature(enable = "sse2")]
#[allow(unsafe_code)]
unsafe fn load_transposed_group(words: [&[u32; 16]; 4], group: usize) -> [__m128i; 4] {
    let row = |t: usize| {
        _mm_set_epi32(
            words[t][group * 4 + 3] as i32,
            words[t][group * 4 + 2] as i32,
            words[t][group * 4 + 1] as i32,
            words[t][group * 4] as i32,
        )
    };
    transpose4(row(0), row(1), row(2), row(3))
}

// SAFETY: see `transpose4`.
#[target_feature(enable = "sse2")]
#[allow(unsafe_code)]
unsafe fn store_transposed_group(vecs: [__m128i; 4], out: &mut [[u32; 8]; 4], group: usize) {
    let cols = transpose4(vecs[0], vecs[1], vecs[2], vecs[3]);
    for (t, col) in cols.iter().enumerate() {
        let mut buf = [0u32; 4];
        _mm_storeu_si128(buf.as_mut_ptr().cast(), *col);
        out[t][group * 4..group * 4 + 4].copy_from_slice(&buf);
    }
}

// =============================================================================
// ROTATIONS
// =============================================================================

// SAFETY: see `transpose4`.
#[target_feature(enable = "sse2")]
#[allow(unsafe_code)]
unsafe fn rotr16(x: __m128i) -> __m128i {
    _mm_or_si128(_mm_srli_epi32(x, 16), _mm_slli_epi32(x, 16))
}

// SAFETY: see `transpose4`.
#[target_feature(enable = "sse2")]
#[allow(unsafe_code)]
unsafe fn rotr12(x: __m128i) -> __m128i {
    _mm_or_si128(_mm_srli_epi32(x, 12), _mm_slli_epi32(x, 20))
}

// SAFETY: see `transpose4`.
#[target_feature(enable = "sse2")]
#[allow(unsafe_code)]
unsafe fn rotr8(x: __m128i) -> __m128i {
    _mm_or_si128(_mm_srli_epi32(x, 8), _mm_slli_epi32(x, 24))
}

// SAFETY: see `transpose4`.
#[target_feature(enable = "sse2")]
#[allow(unsafe_code)]
unsafe fn rotr7(x: __m128i) -> __m128i {
    _mm_or_si128(_mm_srli_epi32(x, 7), _mm_slli_epi32(x, 25))
}

// =============================================================================
// MIXING FUNCTION
// =============================================================================

// SAFETY: see `transpose4`.
#[target_feature(enable = "sse2")]
#[allow(unsafe_code, clippy::too_many_arguments)]
unsafe fn g4(state: &mut [__m128i; 16], a: usize, b: usize, c: usize, d: usize, mx: __m128i, my: __m128i) {
    state[a] = _mm_add_epi32(_mm_add_epi32(state[a], state[b]), mx);
    state[d] = rotr16(_mm_xor_si128(state[d], state[a]));
    state[c] = _mm_add_epi32(state[c], state[d]);
    state[b] = rotr12(_mm_xor_si128(state[b], state[c]));
    state[a] = _mm_add_epi32(_mm_add_epi32(state[a], state[b]), my);
    state[d] = rotr8(_mm_xor_si128(state[d], state[a]));
    state[c] = _mm_add_epi32(state[c], state[d]);
    state[b] = rotr7(_mm_xor_si128(state[b], state[c]));
}

// SAFETY: see `transpose4`.
#[target_feature(enable = "sse2")]
#[allow(unsafe_code)]
unsafe fn round4(state: &mut [__m128i; 16], msg: &[__m128i; 16], schedule: &[usize; 16]) {
    g4(state, 0, 4, 8, 12, msg[schedule[0]], msg[schedule[1]]);
    g4(state, 1, 5, 9, 13, msg[schedule[2]], msg[schedule[3]]);
    g4(state, 2, 6, 10, 14, msg[schedule[4]], msg[schedule[5]]);
    g4(state, 3, 7, 11, 15, msg[schedule[6]], msg[schedule[7]]);
    g4(state, 0, 5, 10, 15, msg[schedule[8]], msg[schedule[9]]);
    g4(state, 1, 6, 11, 12, msg[schedule[10]], msg[schedule[11]]);
    g4(state, 2, 7, 8, 13, msg[schedule[12]], msg[schedule[13]]);
    g4(state, 3, 4, 9, 14, msg[schedule[14]], msg[schedule[15]]);
}

// =============================================================================
// PUBLIC ENTRY POINT
// =============================================================================

/// Compress four independent blocks at once, returning their four chaining
/// values. Every tuple must carry a real 64-byte block (the 4-chunk SIMD
/// batch path in `engine::parallel` only ever calls this on full chunks, so
/// no partial-block handling is needed here).
///
/// # Safety
/// Caller must ensure SSE2 is available. Always true on `x86_64`; on `x86`
/// only call this behind a runtime `is_x86_feature_detected!("sse2")` check
/// (the dispatcher in `engine::dispatcher` does this).
#[allow(unsafe_code)]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn compress4(
    cvs: &[[u32; 8]; 4],
    blocks: &[[u32; 16]; 4],
    counters: [u64; 4],
    block_lens: [u32; 4],
    flags: [u8; 4],
) -> [[u32; 8]; 4] {
    let mut state = [_mm_setzero_si128(); 16];

    // cvs are 8 words; pad to 16 so `load_transposed_group` can share code
    // with the message loader (only groups 0 and 1 are read for the cv).
    let mut padded_cvs = [[0u32; 16]; 4];
    for (p, c) in padded_cvs.iter_mut().zip(cvs.iter()) {
        p[0..8].copy_from_slice(c);
    }
    let padded_refs = [&padded_cvs[0], &padded_cvs[1], &padded_cvs[2], &padded_cvs[3]];
    state[0..4].copy_from_slice(&load_transposed_group(padded_refs, 0));
    state[4..8].copy_from_slice(&load_transposed_group(padded_refs, 1));

    let msg_words: [&[u32; 16]; 4] = [&blocks[0], &blocks[1], &blocks[2], &blocks[3]];

    state[8] = _mm_set1_epi32(IV[0] as i32);
    state[9] = _mm_set1_epi32(IV[1] as i32);
    state[10] = _mm_set1_epi32(IV[2] as i32);
    state[11] = _mm_set1_epi32(IV[3] as i32);
    state[12] = _mm_set_epi32(
        counters[3] as u32 as i32,
        counters[2] as u32 as i32,
        counters[1] as u32 as i32,
        counters[0] as u32 as i32,
    );
    state[13] = _mm_set_epi32(
        (counters[3] >> 32) as u32 as i32,
        (counters[2] >> 32) as u32 as i32,
        (counters[1] >> 32) as u32 as i32,
        (counters[0] >> 32) as u32 as i32,
    );
    state[14] = _mm_set_epi32(
        block_lens[3] as i32,
        block_lens[2] as i32,
        block_lens[1] as i32,
        block_lens[0] as i32,
    );
    state[15] = _mm_set_epi32(
        u32::from(flags[3]) as i32,
        u32::from(flags[2]) as i32,
        u32::from(flags[1]) as i32,
        u32::from(flags[0]) as i32,
    );

    let mut msg = [_mm_setzero_si128(); 16];
    for group in 0..4 {
        let transposed = load_transposed_group(msg_words, group);
        msg[group * 4..group * 4 + 4].copy_from_slice(&transposed);
    }

    for schedule in MSG_SCHEDULE.iter().take(ROUNDS) {
        round4(&mut state, &msg, schedule);
    }

    // out[i] = state[i] XOR state[i+8] for i in 0..8, only the cv half.
    let mut cv_out = [[0u32; 8]; 4];
    for group in 0..2 {
        let mut xored = [_mm_setzero_si128(); 4];
        for lane in 0..4 {
            xored[lane] = _mm_xor_si128(state[group * 4 + lane], state[group * 4 + 8 + lane]);
        }
        store_transposed_group(xored, &mut cv_out, group);
    }

    cv_out
}
