//! Property: `update` is associative over concatenation, and the XOF stream
//! is a pure function of its logical offset.

use blake3_engine::{hash, Hasher};

#[test]
fn update_associativity() {
    bolero::check!()
        .with_type::<(Vec<u8>, Vec<u8>)>()
        .for_each(|(a, b)| {
            let mut streamed = Hasher::new();
            streamed.update(a);
            streamed.update(b);

            let mut concatenated = a.clone();
            concatenated.extend_from_slice(b);

            assert_eq!(streamed.finalize(), hash(&concatenated));
        });
}

#[test]
fn xof_prefix_matches_fixed_finalize() {
    bolero::check!().with_type::<Vec<u8>>().for_each(|data| {
        let mut hasher = Hasher::new();
        hasher.update(data);

        let digest = hasher.finalize();
        let mut xof_prefix = [0u8; 32];
        hasher.finalize_xof().fill(&mut xof_prefix);

        assert_eq!(digest.as_bytes(), &xof_prefix);
    });
}

#[test]
fn xof_reads_concatenate() {
    bolero::check!()
        .with_type::<(Vec<u8>, u8, u8)>()
        .for_each(|(data, n1_raw, n2_raw)| {
            let n1 = (*n1_raw as usize) + 1;
            let n2 = (*n2_raw as usize) + 1;

            let mut hasher = Hasher::new();
            hasher.update(data);

            let mut combined = vec![0u8; n1 + n2];
            hasher.finalize_xof().fill(&mut combined);

            let mut split_reader = hasher.finalize_xof();
            let mut part1 = vec![0u8; n1];
            let mut part2 = vec![0u8; n2];
            split_reader.fill(&mut part1);
            split_reader.fill(&mut part2);

            assert_eq!(combined[..n1], part1[..]);
            assert_eq!(combined[n1..], part2[..]);
        });
}
