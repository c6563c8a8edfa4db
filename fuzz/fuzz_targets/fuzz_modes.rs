#![no_main]

use blake3_engine::{derive_key, hash, keyed_hash, verify};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut key = [0u8; 32];
    let msg_start = if data.len() >= 32 {
        key.copy_from_slice(&data[0..32]);
        32
    } else {
        0
    };
    let msg = &data[msg_start..];

    // Unkeyed one-shot `hash` and `verify` agree.
    let digest = hash(msg);
    assert!(verify(msg, &digest));
    let mut tampered = msg.to_vec();
    tampered.push(0);
    assert!(!verify(&tampered, &digest));

    // Keyed MAC is deterministic and key-separated.
    let mac = keyed_hash(&key, msg).unwrap();
    let mac_again = keyed_hash(&key, msg).unwrap();
    assert_eq!(mac, mac_again, "keyed_hash is not deterministic");

    let mut wrong_key = key;
    wrong_key[0] ^= 0xFF;
    let wrong_mac = keyed_hash(&wrong_key, msg).unwrap();
    assert_ne!(mac, wrong_mac, "different keys collided");

    // Key derivation is deterministic and context-separated.
    let derived_a = derive_key(msg, &key);
    let derived_b = derive_key(msg, &key);
    assert_eq!(derived_a, derived_b, "derive_key is not deterministic");

    let mut flipped_context = msg.to_vec();
    flipped_context.push(0);
    let derived_c = derive_key(&flipped_context, &key);
    assert_ne!(derived_a, derived_c, "derive_key ignored context change");
});
