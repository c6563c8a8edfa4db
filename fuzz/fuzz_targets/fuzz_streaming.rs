#![no_main]

use blake3_engine::Hasher;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let reference = blake3_engine::hash(data);

    // Split into arbitrary small pieces; the digest must not depend on how
    // `update` was chunked.
    let chunk_size = (data[0] as usize % 255) + 1;
    let mut hasher = Hasher::new();
    for chunk in data.chunks(chunk_size) {
        hasher.update(chunk);
    }
    assert_eq!(hasher.finalize(), reference, "streaming vs one-shot mismatch");

    // finalize()'s first 32 bytes must equal finalize_xof()'s first 32 bytes,
    // read in two arbitrary-sized pieces.
    let mut reader = hasher.finalize_xof();
    let split = (data[0] as usize % 64) + 1;
    let mut first = vec![0u8; split];
    let mut rest = vec![0u8; 64 - split];
    reader.fill(&mut first);
    reader.fill(&mut rest);
    let mut combined = [0u8; 64];
    combined[..split].copy_from_slice(&first);
    combined[split..].copy_from_slice(&rest);
    assert_eq!(&combined[..32], reference.as_bytes());
});
