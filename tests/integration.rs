//! Integration tests against the public API.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use blake3_engine::{derive_key, hash, keyed_hash, verify, Hasher};

#[test]
fn hash_is_deterministic_and_nonzero() {
    let input = b"Hello, world!";
    let a = hash(input);
    let b = hash(input);
    assert_eq!(a, b, "hash must be deterministic");
    assert_ne!(a.as_bytes(), &[0u8; 32], "hash should not be all zeros");
}

#[test]
fn backend_reporting() {
    let backend = blake3_engine::active_backend();
    assert!(!backend.is_empty());
}

#[test]
fn large_input_is_stable() {
    let input = vec![0x42u8; 1024 * 1024];
    let a = hash(&input);
    let mut hasher = Hasher::new();
    hasher.update(&input);
    assert_eq!(a, hasher.finalize());
}

#[test]
fn verify_roundtrip() {
    let input = b"Secure Data";
    let digest = hash(input);
    assert!(verify(input, &digest));

    let tampered = b"Secure data";
    assert!(!verify(tampered, &digest));
}

#[test]
fn keyed_hash_requires_32_byte_key() {
    assert!(keyed_hash(&[0u8; 31], b"msg").is_err());
    assert!(keyed_hash(&[0u8; 32], b"msg").is_ok());
}

#[test]
fn derive_key_context_separation() {
    let material = b"root secret";
    let a = derive_key(b"app A", material);
    let b = derive_key(b"app B", material);
    assert_ne!(a, b);
}

// =============================================================================
// STREAMING TESTS
// =============================================================================

#[test]
fn streaming_matches_one_shot_across_arbitrary_splits() {
    let data: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
    let reference = hash(&data);

    for chunk_size in [1usize, 7, 63, 64, 65, 1023, 1024, 1025, 4096, 4097] {
        let mut hasher = Hasher::new();
        for chunk in data.chunks(chunk_size) {
            hasher.update(chunk);
        }
        assert_eq!(
            hasher.finalize(),
            reference,
            "mismatch at chunk_size={chunk_size}"
        );
    }
}

#[test]
fn stack_depth_tracks_popcount_of_chunk_count() {
    // Indirect check: hashing N full chunks then finalizing must agree with
    // hashing the same bytes in one shot, for N spanning several popcount
    // patterns. The accumulator's merge count has its own unit tests; this
    // confirms the externally observable digest is unaffected by how many
    // merges that implies.
    for n_chunks in [1u32, 2, 3, 4, 5, 7, 8, 9, 15, 16, 17, 31, 32, 33] {
        let data = vec![0xAAu8; n_chunks as usize * 1024];
        let one_shot = hash(&data);

        let mut streamed = Hasher::new();
        for chunk in data.chunks(1024) {
            streamed.update(chunk);
        }
        assert_eq!(streamed.finalize(), one_shot, "n_chunks={n_chunks}");
    }
}

#[test]
fn xof_output_is_a_pure_stream() {
    let mut hasher = Hasher::new();
    hasher.update(b"xof stream contents");

    let mut whole = vec![0u8; 300];
    hasher.finalize_xof().fill(&mut whole);

    let mut reader = hasher.finalize_xof();
    let mut a = vec![0u8; 123];
    let mut b = vec![0u8; 177];
    reader.fill(&mut a);
    reader.fill(&mut b);

    assert_eq!(whole[..123], a[..]);
    assert_eq!(whole[123..], b[..]);
}

#[test]
fn finalize_into_reports_output_buffer_too_small() {
    let mut hasher = Hasher::new();
    hasher.update(b"short buffer test");
    let mut buf = [0u8; 16];
    assert!(hasher.finalize_into(&mut buf, 32).is_err());
    assert!(hasher.finalize_into(&mut buf, 16).is_ok());
}
