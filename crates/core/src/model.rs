//! Huffman model: alphabet, canonical codebook and matching decode tree.
//!
//! A model is built once, either from sample bytes or from a transmitted
//! length table, and is immutable afterwards. The codebook drives encoding,
//! the tree drives decoding, and both always describe the same code.
//!
//! # Descriptor format
//! `marshal` writes one byte per alphabet symbol, in ascending symbol order,
//! holding that symbol's code length. Neither the alphabet nor the patterns
//! are transmitted: the receiver supplies the alphabet and recovers the
//! patterns with the canonical assignment rule.

use crate::byteseq::ByteSeq;
use crate::codebook::Codebook;
use crate::default_model::{default_alphabet, DEFAULT_CODE_LENGTHS};
use crate::error::{HuffmanError, Result};
use crate::frequency::{build_frequency_table, table_from_counts};
use crate::tree::HuffmanTree;

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    alphabet: Vec<u8>,
    codebook: Codebook,
    tree: HuffmanTree,
}

impl Model {
    /// Model with no symbols. Can only encode and decode empty input.
    pub fn empty() -> Self {
        Self {
            alphabet: Vec::new(),
            codebook: Codebook::new(),
            tree: HuffmanTree::empty(),
        }
    }

    /// Build a model from the symbol statistics of `bytes`.
    ///
    /// The alphabet is the set of distinct bytes, ascending. Empty input
    /// gives `Model::empty()`.
    pub fn create_from_text(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            log::debug!("empty sample, using empty model");
            return Ok(Self::empty());
        }

        let table = build_frequency_table(bytes);
        let raw = HuffmanTree::build(&table)?.codebook();
        let alphabet = raw.iter().map(|(symbol, _)| symbol).collect();
        Self::from_codebook(alphabet, raw.canonicalize()?)
    }

    /// Build a model over a fixed `alphabet` from the statistics of `bytes`.
    ///
    /// The alphabet is stored ascending, whatever order it is given in.
    /// Every alphabet symbol gets one extra count, so symbols that never
    /// occur in `bytes` still receive a (long) code. This is what allows the
    /// descriptor to line up with an alphabet the receiver already knows.
    ///
    /// # Errors
    /// - `HuffmanError::UnknownSymbol` if `bytes` holds a symbol outside
    ///   the alphabet
    /// - `HuffmanError::DuplicateSymbol` if the alphabet repeats a symbol
    pub fn fit_to_alphabet(alphabet: &[u8], bytes: &[u8]) -> Result<Self> {
        let mut in_alphabet = [false; 256];
        for &symbol in alphabet {
            if in_alphabet[symbol as usize] {
                return Err(HuffmanError::DuplicateSymbol { symbol }.into());
            }
            in_alphabet[symbol as usize] = true;
        }

        let mut counts = [0u64; 256];
        for &byte in bytes {
            if !in_alphabet[byte as usize] {
                return Err(HuffmanError::UnknownSymbol { symbol: byte }.into());
            }
            counts[byte as usize] += 1;
        }
        if alphabet.is_empty() {
            return Ok(Self::empty());
        }
        for &symbol in alphabet {
            counts[symbol as usize] += 1;
        }

        let total = bytes.len() as u64 + alphabet.len() as u64;
        let table = table_from_counts(&counts, total);
        let raw = HuffmanTree::build(&table)?.codebook();
        let mut alphabet = alphabet.to_vec();
        alphabet.sort_unstable();
        Self::from_codebook(alphabet, raw.canonicalize()?)
    }

    /// Rebuild a model from an ordered alphabet and a parallel length table.
    ///
    /// `lengths[i]` belongs to `alphabet[i]`; the alphabet may come in any
    /// order and is stored ascending. Lengths are taken as ground truth: no
    /// frequencies and no tree builder are involved.
    ///
    /// # Errors
    /// - `HuffmanError::SizeMismatch` if the slices differ in length
    /// - `HuffmanError::DuplicateSymbol` / `InvalidCodeLengths` if the
    ///   pair does not describe a valid prefix code
    pub fn unmarshal(alphabet: &[u8], lengths: &[u8]) -> Result<Self> {
        if alphabet.len() != lengths.len() {
            return Err(HuffmanError::SizeMismatch {
                alphabet: alphabet.len(),
                lengths: lengths.len(),
            }
            .into());
        }

        let mut pairs: Vec<(u8, u32)> = alphabet
            .iter()
            .zip(lengths)
            .map(|(&symbol, &length)| (symbol, length as u32))
            .collect();
        pairs.sort_unstable_by_key(|&(symbol, _)| symbol);

        let codebook = Codebook::from_lengths(&pairs)?;
        let alphabet = pairs.iter().map(|&(symbol, _)| symbol).collect();
        Self::from_codebook(alphabet, codebook)
    }

    /// The pinned default model (see `default_model`).
    pub fn default_model() -> Result<Self> {
        Self::unmarshal(&default_alphabet(), &DEFAULT_CODE_LENGTHS)
    }

    fn from_codebook(alphabet: Vec<u8>, codebook: Codebook) -> Result<Self> {
        let tree = HuffmanTree::from_codebook(&codebook)?;
        log::debug!(
            "built model: {} symbols, longest code {} bits, {} tree nodes",
            alphabet.len(),
            codebook.max_len(),
            tree.node_count()
        );
        Ok(Self {
            alphabet,
            codebook,
            tree,
        })
    }

    /// Code for `symbol`.
    ///
    /// # Errors
    /// `HuffmanError::UnknownSymbol` if the symbol is not in the alphabet.
    pub fn get_pattern(&self, symbol: u8) -> Result<ByteSeq> {
        self.codebook
            .get(symbol)
            .ok_or_else(|| HuffmanError::UnknownSymbol { symbol }.into())
    }

    /// Serialize the code lengths, one byte per symbol, ascending by symbol.
    ///
    /// # Errors
    /// `HuffmanError::CodeLengthTooLong` if a length does not fit in a byte.
    pub fn marshal(&self) -> Result<Vec<u8>> {
        self.codebook
            .iter()
            .map(|(_, code)| {
                u8::try_from(code.len()).map_err(|_| {
                    HuffmanError::CodeLengthTooLong {
                        length: code.len() as usize,
                    }
                    .into()
                })
            })
            .collect()
    }

    /// Symbols in scope, ascending. `marshal` writes lengths in this order.
    pub fn alphabet(&self) -> &[u8] {
        &self.alphabet
    }

    pub fn codebook(&self) -> &Codebook {
        &self.codebook
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn is_empty(&self) -> bool {
        self.alphabet.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const SAMPLE: &[u8] = b"A_DEAD_DAD_CEDED_A_BAD_BABE_A_BEADED_ABACA_BED";

    #[test]
    fn test_create_from_text() {
        let model = Model::create_from_text(SAMPLE).unwrap();
        assert_eq!(model.alphabet(), b"ABCDE_");
        let expected = [
            (b'A', 0x00, 2),
            (b'D', 0x01, 2),
            (b'_', 0x02, 2),
            (b'E', 0x06, 3),
            (b'B', 0x0e, 4),
            (b'C', 0x0f, 4),
        ];
        for (symbol, pattern, len) in expected {
            assert_eq!(model.get_pattern(symbol).unwrap(), ByteSeq::new(pattern, len));
        }
        assert!(model.codebook().is_prefix_free());
        assert_eq!(model.tree().codebook(), *model.codebook());
    }

    #[test]
    fn test_get_pattern_unknown_symbol() {
        let model = Model::create_from_text(SAMPLE).unwrap();
        assert!(matches!(
            model.get_pattern(b'P'),
            Err(Error::Huffman(HuffmanError::UnknownSymbol { symbol: b'P' }))
        ));
    }

    #[test]
    fn test_marshal_one_byte_per_symbol() {
        let model = Model::create_from_text(SAMPLE).unwrap();
        let bytes = model.marshal().unwrap();
        // A B C D E _
        assert_eq!(bytes, vec![2, 4, 4, 2, 3, 2]);
    }

    #[test]
    fn test_unmarshal_lowercase_alphabet() {
        let alphabet = b"abcdefghijklmnopqrstuvwxyz";
        let lengths = [
            5, 5, 5, 5, 5, 4, 5, 5, 5, 5, 5, 4, 5, 5, 5, 5, 4, 4, 4, 5, 4, 5, 5, 5, 5, 5,
        ];
        let model = Model::unmarshal(alphabet, &lengths).unwrap();
        assert_eq!(model.codebook().len(), 26);
        for (symbol, &len) in alphabet.iter().zip(&lengths) {
            assert_eq!(model.get_pattern(*symbol).unwrap().len(), len as u32);
        }

        let mut leaves = model.tree().symbols_in_order();
        leaves.sort_unstable();
        assert_eq!(leaves, alphabet.to_vec());
    }

    #[test]
    fn test_unmarshal_size_mismatch() {
        assert!(matches!(
            Model::unmarshal(b"abc", &[1, 2]),
            Err(Error::Huffman(HuffmanError::SizeMismatch {
                alphabet: 3,
                lengths: 2
            }))
        ));
    }

    #[test]
    fn test_marshal_unmarshal_round_trip() {
        let model = Model::create_from_text(b"mississippi river banks").unwrap();
        let lengths = model.marshal().unwrap();
        let restored = Model::unmarshal(model.alphabet(), &lengths).unwrap();
        assert_eq!(restored.codebook(), model.codebook());
        assert_eq!(restored, model);
    }

    #[test]
    fn test_unmarshal_descending_alphabet() {
        let model = Model::unmarshal(b"cba", &[1, 2, 2]).unwrap();
        assert_eq!(model.alphabet(), b"abc");
        assert_eq!(model.get_pattern(b'c').unwrap(), ByteSeq::new(0b0, 1));
        assert_eq!(model.get_pattern(b'a').unwrap(), ByteSeq::new(0b10, 2));
        assert_eq!(model.get_pattern(b'b').unwrap(), ByteSeq::new(0b11, 2));
        assert_eq!(model.marshal().unwrap(), vec![2, 2, 1]);

        let restored = Model::unmarshal(model.alphabet(), &model.marshal().unwrap()).unwrap();
        assert_eq!(restored.codebook(), model.codebook());
        assert_eq!(restored, model);
    }

    #[test]
    fn test_fit_to_unordered_alphabet_round_trips() {
        let model = Model::fit_to_alphabet(b"zyx", b"xxxxxxxxy").unwrap();
        assert_eq!(model.alphabet(), b"xyz");

        let restored = Model::unmarshal(model.alphabet(), &model.marshal().unwrap()).unwrap();
        assert_eq!(restored.codebook(), model.codebook());
        assert_eq!(restored, model);
    }

    #[test]
    fn test_empty_text_gives_empty_model() {
        let model = Model::create_from_text(b"").unwrap();
        assert!(model.is_empty());
        assert!(model.tree().is_empty());
        assert_eq!(model.marshal().unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_single_symbol_text() {
        let model = Model::create_from_text(b"xxxxxxxx").unwrap();
        assert_eq!(model.get_pattern(b'x').unwrap(), ByteSeq::empty());
        assert_eq!(model.marshal().unwrap(), vec![0]);
    }

    #[test]
    fn test_default_model() {
        let model = Model::default_model().unwrap();
        assert_eq!(model.alphabet().len(), 256);
        assert_eq!(model.marshal().unwrap(), DEFAULT_CODE_LENGTHS.to_vec());
        assert!(model.codebook().is_prefix_free());
        assert_eq!(model.tree().leaf_count(), 256);
    }

    #[test]
    fn test_fit_to_alphabet_covers_all_symbols() {
        let model = Model::fit_to_alphabet(&default_alphabet(), b"aaaaaaaaaaaaaaaab").unwrap();
        assert_eq!(model.codebook().len(), 256);
        assert_eq!(model.marshal().unwrap().len(), 256);
        let a = model.get_pattern(b'a').unwrap().len();
        let z = model.get_pattern(b'z').unwrap().len();
        assert!(a < z);
    }

    #[test]
    fn test_fit_to_alphabet_rejects_outsiders() {
        assert!(matches!(
            Model::fit_to_alphabet(b"ab", b"abc"),
            Err(Error::Huffman(HuffmanError::UnknownSymbol { symbol: b'c' }))
        ));
        assert!(matches!(
            Model::fit_to_alphabet(b"aba", b"ab"),
            Err(Error::Huffman(HuffmanError::DuplicateSymbol { symbol: b'a' }))
        ));
    }
}
