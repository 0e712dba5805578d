//! Fixed-capacity bit patterns used as Huffman codes.

use std::fmt;

/// Maximum number of bits a `ByteSeq` can hold.
pub const MAX_BITS: u32 = 64;

/// An ordered bit pattern of at most 64 bits.
///
/// The pattern is read most-significant bit first: the bit at position
/// `len - 1` is emitted first and bit 0 last. `add_bit` places the new bit
/// above all existing ones, so walking a tree from leaf to root and adding
/// each edge bit yields the root-to-leaf reading order.
///
/// # Invariants
/// - `len <= 64`
/// - bits of `pattern` at positions `>= len` are zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ByteSeq {
    pattern: u64,
    len: u32,
}

impl ByteSeq {
    /// Create a sequence from the low `len` bits of `pattern`.
    ///
    /// # Panics
    /// Panics if `len > 64`.
    pub fn new(pattern: u64, len: u32) -> Self {
        assert!(len <= MAX_BITS, "ByteSeq cannot hold {} bits", len);
        Self {
            pattern: pattern & mask(len),
            len,
        }
    }

    /// The empty sequence.
    pub const fn empty() -> Self {
        Self { pattern: 0, len: 0 }
    }

    /// Raw pattern value, right-aligned.
    pub fn pattern(&self) -> u64 {
        self.pattern
    }

    /// Number of bits in the sequence.
    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Prepend a bit as the new most-significant bit.
    ///
    /// # Panics
    /// Panics if the sequence already holds 64 bits.
    pub fn add_bit(&mut self, one: bool) {
        assert!(
            self.len < MAX_BITS,
            "can't add more than {} bits to a ByteSeq",
            MAX_BITS
        );
        if one {
            self.pattern |= 1u64 << self.len;
        }
        self.len += 1;
    }

    /// Bit at `index` counted from the least-significant end.
    pub fn bit(&self, index: u32) -> bool {
        index < self.len && (self.pattern >> index) & 1 == 1
    }

    /// Iterate over the bits in emission order (most-significant first).
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).rev().map(move |i| self.bit(i))
    }

    /// Whether `self` is a proper prefix of `other`.
    pub fn is_prefix_of(&self, other: &ByteSeq) -> bool {
        if self.len >= other.len {
            return false;
        }
        let shift = other.len - self.len;
        // shift may be 64 when self is empty
        other.pattern.checked_shr(shift).unwrap_or(0) == self.pattern
    }
}

impl fmt::Display for ByteSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Mask selecting the low `len` bits.
pub(crate) fn mask(len: u32) -> u64 {
    if len >= 64 {
        u64::MAX
    } else {
        (1u64 << len) - 1
    }
}
