//! Property-based tests for the codec
//!
//! Uses proptest to check the invariants every model and stream must hold,
//! whatever the input bytes look like.

use huffpack_core::default_model::default_alphabet;
use huffpack_core::{build_frequency_table, compress, decompress, Flags, Model, Reader, Writer};
use proptest::prelude::*;

// =============================================================================
// GENERATORS
// =============================================================================

/// Bytes drawn from a small alphabet so that code lengths vary
fn skewed_bytes_strategy(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(
        prop_oneof![
            8 => Just(b'e'),
            4 => Just(b't'),
            2 => prop::sample::select(b"aoins".to_vec()),
            1 => any::<u8>(),
        ],
        1..=max_len,
    )
}

fn flags_strategy() -> impl Strategy<Value = Flags> {
    (0u16..4).prop_map(Flags::from_bits)
}

// =============================================================================
// FREQUENCY TABLE
// =============================================================================

proptest! {
    #[test]
    fn prop_frequencies_sum_to_one(bytes in prop::collection::vec(any::<u8>(), 1..2000)) {
        let table = build_frequency_table(&bytes);
        prop_assert!((table.total_frequency() - 1.0).abs() < 1e-7);

        let counted: u64 = table.iter().map(|(_, entry)| entry.count).sum();
        prop_assert_eq!(counted, bytes.len() as u64);
    }
}

// =============================================================================
// MODEL
// =============================================================================

proptest! {
    #[test]
    fn prop_codes_are_prefix_free(bytes in skewed_bytes_strategy(2000)) {
        let model = Model::create_from_text(&bytes).unwrap();
        prop_assert!(model.codebook().is_prefix_free());
        prop_assert_eq!(model.tree().codebook(), model.codebook().clone());
        prop_assert_eq!(model.tree().leaf_count(), model.alphabet().len());
    }

    #[test]
    fn prop_kraft_sum_is_one(bytes in skewed_bytes_strategy(2000)) {
        let model = Model::create_from_text(&bytes).unwrap();
        prop_assume!(model.alphabet().len() > 1);

        let max = model.codebook().max_len();
        let kraft: u128 = model
            .codebook()
            .iter()
            .map(|(_, code)| 1u128 << (max - code.len()))
            .sum();
        prop_assert_eq!(kraft, 1u128 << max);
    }

    #[test]
    fn prop_canonical_order(bytes in skewed_bytes_strategy(2000)) {
        let model = Model::create_from_text(&bytes).unwrap();

        let mut codes: Vec<_> = model.codebook().iter().collect();
        codes.sort_by_key(|(symbol, code)| (code.len(), *symbol));
        for pair in codes.windows(2) {
            let (_, a) = pair[0];
            let (_, b) = pair[1];
            // next pattern is the previous one plus one, shifted to the new length
            prop_assert_eq!(b.pattern(), (a.pattern() + 1) << (b.len() - a.len()));
        }
    }

    #[test]
    fn prop_model_is_deterministic(bytes in skewed_bytes_strategy(1000)) {
        let first = Model::create_from_text(&bytes).unwrap();
        let second = Model::create_from_text(&bytes).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_marshal_unmarshal(bytes in skewed_bytes_strategy(2000)) {
        let model = Model::create_from_text(&bytes).unwrap();
        let lengths = model.marshal().unwrap();
        prop_assert_eq!(lengths.len(), model.alphabet().len());

        let restored = Model::unmarshal(model.alphabet(), &lengths).unwrap();
        prop_assert_eq!(restored.codebook(), model.codebook());
    }

    #[test]
    fn prop_unmarshal_ignores_alphabet_order(bytes in skewed_bytes_strategy(2000)) {
        let model = Model::create_from_text(&bytes).unwrap();
        let lengths = model.marshal().unwrap();

        let reversed_alphabet: Vec<u8> = model.alphabet().iter().rev().copied().collect();
        let reversed_lengths: Vec<u8> = lengths.iter().rev().copied().collect();
        let restored = Model::unmarshal(&reversed_alphabet, &reversed_lengths).unwrap();
        prop_assert_eq!(restored.alphabet(), model.alphabet());
        prop_assert_eq!(restored.marshal().unwrap(), lengths);
        prop_assert_eq!(restored.codebook(), model.codebook());
    }

    #[test]
    fn prop_fitted_model_covers_default_alphabet(
        bytes in prop::collection::vec(any::<u8>(), 0..500),
    ) {
        let model = Model::fit_to_alphabet(&default_alphabet(), &bytes).unwrap();
        prop_assert_eq!(model.codebook().len(), 256);
        prop_assert!(model.codebook().is_prefix_free());
    }
}

// =============================================================================
// STREAMS AND CONTAINERS
// =============================================================================

proptest! {
    #[test]
    fn prop_stream_round_trip(bytes in skewed_bytes_strategy(3000)) {
        let model = Model::create_from_text(&bytes).unwrap();

        let mut writer = Writer::new(Vec::new(), &model);
        writer.write(&bytes).unwrap();
        let bits = writer.bits_written();
        let encoded = writer.close().unwrap();
        prop_assert_eq!(encoded.len() as u64, bits.div_ceil(8));

        let mut reader = Reader::new(&encoded[..], &model);
        let mut decoded = vec![0u8; bytes.len()];
        reader.read(&mut decoded).unwrap();
        prop_assert_eq!(decoded, bytes);
    }

    #[test]
    fn prop_container_round_trip(
        bytes in prop::collection::vec(any::<u8>(), 0..3000),
        flags in flags_strategy(),
    ) {
        let packed = compress(&bytes, flags).unwrap();
        prop_assert_eq!(decompress(&packed).unwrap(), bytes);
    }

    #[test]
    fn prop_truncated_container_never_decodes(
        bytes in skewed_bytes_strategy(500),
        cut in 1usize..16,
    ) {
        let packed = compress(&bytes, Flags::CHECKSUM).unwrap();
        let cut = cut.min(packed.len());
        prop_assert!(decompress(&packed[..packed.len() - cut]).is_err());
    }
}
