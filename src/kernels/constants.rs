//! BLAKE3 constants.
//!
//! Bit-exact values from the BLAKE3 specification (Aumasson, Neves,
//! Wilcox-O'Hearn, O'Connor 2020). Nothing here is tunable.

// =============================================================================
// SIZES
// =============================================================================

/// Hash output size in bytes for a standard (non-XOF) digest.
pub const OUT_LEN: usize = 32;

/// Bytes consumed by a single call to the compression function.
pub const BLOCK_LEN: usize = 64;

/// Bytes accumulated into one chunk before it is compressed as a leaf.
pub const CHUNK_LEN: usize = 1024;

/// Number of 64-byte blocks per full chunk.
pub const BLOCKS_PER_CHUNK: usize = CHUNK_LEN / BLOCK_LEN;

/// Upper bound on the chaining-value stack depth. `popcount` of a 64-bit
/// chunk counter never exceeds 64; 54 already covers inputs up to 2^64
/// chunks (2^74 bytes) with headroom.
pub const MAX_STACK_DEPTH: usize = 54;

// =============================================================================
// INITIALIZATION VECTOR
// =============================================================================

/// The SHA-256 IV, reused by BLAKE3 as its own initialization vector.
pub const IV: [u32; 8] = [
    0x6A09_E667,
    0xBB67_AE85,
    0x3C6E_F372,
    0xA54F_F53A,
    0x510E_527F,
    0x9B05_688C,
    0x1F83_D9AB,
    0x5BE0_CD19,
];

// =============================================================================
// DOMAIN-SEPARATION FLAGS
// =============================================================================

pub const CHUNK_START: u8 = 1 << 0;
pub const CHUNK_END: u8 = 1 << 1;
pub const PARENT: u8 = 1 << 2;
pub const ROOT: u8 = 1 << 3;
pub const KEYED_HASH: u8 = 1 << 4;
pub const DERIVE_KEY_CONTEXT: u8 = 1 << 5;
pub const DERIVE_KEY_MATERIAL: u8 = 1 << 6;

// =============================================================================
// MESSAGE SCHEDULE
// =============================================================================

/// Number of rounds applied by the compression function.
pub const ROUNDS: usize = 7;

/// Per-round message word permutation. `MSG_SCHEDULE[r][i]` is the message
/// word index consumed by the `i`-th slot of round `r`. Row 0 is the
/// identity; each subsequent row is the previous one permuted by the fixed
/// schedule `[2,6,3,10,7,0,4,13,1,11,12,5,9,14,15,8]`.
pub const MSG_SCHEDULE: [[usize; 16]; ROUNDS] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    [2, 6, 3, 10, 7, 0, 4, 13, 1, 11, 12, 5, 9, 14, 15, 8],
    [3, 4, 10, 12, 13, 2, 7, 14, 6, 5, 9, 0, 11, 15, 8, 1],
    [10, 7, 12, 9, 14, 3, 13, 15, 4, 0, 11, 2, 5, 8, 1, 6],
    [12, 13, 9, 11, 15, 10, 14, 8, 7, 2, 5, 3, 0, 1, 6, 4],
    [9, 14, 11, 5, 8, 12, 15, 1, 13, 3, 0, 10, 2, 6, 4, 7],
    [11, 15, 5, 0, 1, 9, 8, 6, 14, 10, 2, 12, 3, 4, 7, 13],
];
