//! Symbol to code mapping and canonical code assignment.
//!
//! # Canonical codes
//! Only code lengths survive normalization. Symbols are ordered by
//! `(length, symbol)`; the first gets pattern 0, each following symbol gets
//! the previous pattern plus one, shifted left by however much its length
//! grew. The result is a prefix code fully determined by the length table,
//! which is what lets a model travel as one length byte per symbol.

use crate::byteseq::{ByteSeq, MAX_BITS};
use crate::error::{HuffmanError, Result};

/// Mapping from byte value to code, at most one entry per byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codebook {
    codes: [Option<ByteSeq>; 256],
}

impl Codebook {
    pub fn new() -> Self {
        Self {
            codes: [None; 256],
        }
    }

    /// Insert or replace the code for `symbol`.
    pub fn insert(&mut self, symbol: u8, code: ByteSeq) {
        self.codes[symbol as usize] = Some(code);
    }

    pub fn get(&self, symbol: u8) -> Option<ByteSeq> {
        self.codes[symbol as usize]
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.codes[symbol as usize].is_some()
    }

    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(|c| c.is_none())
    }

    /// Iterate `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, ByteSeq)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(s, c)| c.map(|c| (s as u8, c)))
    }

    /// `(symbol, code length)` pairs in ascending symbol order.
    pub fn lengths(&self) -> Vec<(u8, u32)> {
        self.iter().map(|(s, c)| (s, c.len())).collect()
    }

    /// Length of the longest code, 0 for an empty codebook.
    pub fn max_len(&self) -> u32 {
        self.iter().map(|(_, c)| c.len()).max().unwrap_or(0)
    }

    /// Whether no code is a proper prefix of, or equal to, another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<ByteSeq> = self.iter().map(|(_, c)| c).collect();
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                if a == b || a.is_prefix_of(b) || b.is_prefix_of(a) {
                    return false;
                }
            }
        }
        true
    }

    /// Replace every code by its canonical pattern, keeping lengths.
    pub fn canonicalize(&self) -> Result<Codebook> {
        Codebook::from_lengths(&self.lengths())
    }

    /// Build a canonical codebook straight from `(symbol, length)` pairs.
    ///
    /// Pair order does not matter. Lengths are taken as ground truth.
    ///
    /// # Errors
    /// - `HuffmanError::DuplicateSymbol` if a symbol is listed twice
    /// - `HuffmanError::InvalidCodeLengths` if the lengths over-subscribe
    ///   the code space or exceed 64 bits
    pub fn from_lengths(lengths: &[(u8, u32)]) -> Result<Codebook> {
        let mut seen = [false; 256];
        for &(symbol, _) in lengths {
            if seen[symbol as usize] {
                return Err(HuffmanError::DuplicateSymbol { symbol }.into());
            }
            seen[symbol as usize] = true;
        }

        let mut ordered = lengths.to_vec();
        ordered.sort_by_key(|&(symbol, length)| (length, symbol));

        let mut book = Codebook::new();
        // wide enough that over-subscription shows up instead of wrapping
        let mut pattern: u128 = 0;
        let mut prev_len = ordered.first().map(|&(_, l)| l).unwrap_or(0);

        for &(symbol, length) in &ordered {
            if length > MAX_BITS {
                return Err(HuffmanError::InvalidCodeLengths { symbol, length }.into());
            }
            pattern <<= length - prev_len;
            if pattern >> length != 0 {
                return Err(HuffmanError::InvalidCodeLengths { symbol, length }.into());
            }
            book.insert(symbol, ByteSeq::new(pattern as u64, length));
            pattern += 1;
            prev_len = length;
        }

        Ok(book)
    }
}

impl Default for Codebook {
    fn default() -> Self {
        Self::new()
    }
}
