//! Property: the three hashing modes are mutually distinguishable and each
//! is internally deterministic.

use blake3_engine::{derive_key, hash, keyed_hash};

#[test]
fn keyed_hash_is_deterministic_and_key_separated() {
    bolero::check!()
        .with_type::<([u8; 32], [u8; 32], Vec<u8>)>()
        .for_each(|(key_a, key_b, msg)| {
            let a1 = keyed_hash(key_a, msg).unwrap();
            let a2 = keyed_hash(key_a, msg).unwrap();
            assert_eq!(a1, a2);

            if key_a != key_b {
                let b = keyed_hash(key_b, msg).unwrap();
                assert_ne!(a1, b);
            }
        });
}

#[test]
fn derive_key_is_deterministic_and_context_separated() {
    bolero::check!()
        .with_type::<(Vec<u8>, Vec<u8>, Vec<u8>)>()
        .for_each(|(context_a, context_b, material)| {
            let a1 = derive_key(context_a, material);
            let a2 = derive_key(context_a, material);
            assert_eq!(a1, a2);

            if context_a != context_b {
                let b = derive_key(context_b, material);
                assert_ne!(a1, b);
            }
        });
}

#[test]
fn plain_and_keyed_hash_never_collide_on_same_input() {
    bolero::check!()
        .with_type::<([u8; 32], Vec<u8>)>()
        .for_each(|(key, msg)| {
            assert_ne!(hash(msg), keyed_hash(key, msg).unwrap());
        });
}
