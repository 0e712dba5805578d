//! Sample input generation.
//!
//! When `compress` is run without `--in`, or with the `sample` command, we
//! generate data whose byte distribution exercises the codec in different
//! ways.
//!
//! # Design
//!
//! The sample is a sequence of sections, each drawn from one `SectionKind`:
//! - prose: English-like words, which the default model is tuned for
//! - runs: long runs of one byte, the best case for a fitted model
//! - binary: a narrow band of byte values, poorly served by the default model
//! - noise: uniform random bytes, which no Huffman code can shrink

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::Write;
use std::path::Path;

/// Largest section emitted in one go
const MAX_SECTION_BYTES: usize = 4096;

const WORDS: &[&str] = &[
    "the", "of", "and", "to", "in", "is", "that", "for", "it", "as", "with", "was", "on", "be",
    "by", "this", "code", "length", "symbol", "tree", "stream", "model", "byte", "bit", "prefix",
    "frequency", "canonical", "table", "header", "payload",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Prose,
    Runs,
    Binary,
    Noise,
}

impl SectionKind {
    /// Pick a kind: prose 40%, runs 20%, binary 20%, noise 20%.
    fn choose(rng: &mut ChaCha8Rng) -> Self {
        match rng.gen_range(0..10) {
            0..=3 => SectionKind::Prose,
            4..=5 => SectionKind::Runs,
            6..=7 => SectionKind::Binary,
            _ => SectionKind::Noise,
        }
    }
}

/// Generate `size_bytes` of mixed sample data, fully determined by `seed`.
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    while data.len() < size_bytes {
        let len = (size_bytes - data.len()).min(rng.gen_range(256..=MAX_SECTION_BYTES));
        let kind = SectionKind::choose(&mut rng);
        let start = data.len();

        match kind {
            SectionKind::Prose => push_prose(&mut rng, &mut data, len),
            SectionKind::Runs => {
                while data.len() - start < len {
                    let byte: u8 = rng.gen();
                    let run = rng.gen_range(8..=256).min(len - (data.len() - start));
                    data.extend(std::iter::repeat(byte).take(run));
                }
            }
            SectionKind::Binary => {
                let base: u8 = rng.gen_range(0x80..=0xf0);
                data.extend((0..len).map(|_| base + rng.gen_range(0..16)));
            }
            SectionKind::Noise => data.extend((0..len).map(|_| rng.gen::<u8>())),
        }

        data.truncate(start + len);
    }

    data
}

fn push_prose(rng: &mut ChaCha8Rng, data: &mut Vec<u8>, len: usize) {
    let start = data.len();
    let mut sentence_start = true;
    while data.len() - start < len {
        let word = WORDS[rng.gen_range(0..WORDS.len())].as_bytes();
        if sentence_start {
            data.push(word[0].to_ascii_uppercase());
            data.extend_from_slice(&word[1..]);
            sentence_start = false;
        } else {
            data.extend_from_slice(word);
        }

        match rng.gen_range(0..12) {
            0 => {
                data.extend_from_slice(b". ");
                sentence_start = true;
            }
            1 => data.extend_from_slice(b", "),
            2 => {
                data.extend_from_slice(b".\n");
                sentence_start = true;
            }
            _ => data.push(b' '),
        }
    }
}

/// Generate a sample and write it to `path`.
pub fn write_sample_file(path: &Path, seed: u64, size_bytes: usize) -> std::io::Result<Vec<u8>> {
    let data = generate_sample_data(seed, size_bytes);
    let mut file = std::fs::File::create(path)?;
    file.write_all(&data)?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_sizes() {
        for size in [0, 1, 255, 1000, 4097, 100_000] {
            assert_eq!(generate_sample_data(999, size).len(), size);
        }
    }

    #[test]
    fn test_determinism() {
        assert_eq!(generate_sample_data(12345, 5000), generate_sample_data(12345, 5000));
        assert_ne!(generate_sample_data(1, 5000), generate_sample_data(2, 5000));
    }

    #[test]
    fn test_prose_is_text() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut data = Vec::new();
        push_prose(&mut rng, &mut data, 500);
        assert!(data.len() >= 500);
        assert!(data.iter().all(|b| b.is_ascii_alphabetic() || b" ,.\n".contains(b)));
        assert!(data[0].is_ascii_uppercase());
    }

    #[test]
    fn test_sample_round_trips() {
        let data = generate_sample_data(42, 20_000);
        for flags in [huffpack_core::Flags::NONE, huffpack_core::Flags::MODEL_EMBEDDED] {
            let packed = huffpack_core::compress(&data, flags).unwrap();
            assert_eq!(huffpack_core::decompress(&packed).unwrap(), data);
        }
    }
}
