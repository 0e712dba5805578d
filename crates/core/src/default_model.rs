//! Pinned default model shared by every encoder and decoder.
//!
//! Containers written without an embedded model are decoded with this table,
//! so it is part of the wire format: changing a single length breaks every
//! stream written before the change. Any revision must bump
//! `DEFAULT_MODEL_VERSION` together with the container format version.
//!
//! The alphabet is every byte value in ascending order. Lengths were fitted
//! once to English technical prose with add-one smoothing, so every byte
//! still has a code. The table is complete (Kraft sum exactly 1) and its
//! longest code is 14 bits.

/// Revision of `DEFAULT_CODE_LENGTHS`.
pub const DEFAULT_MODEL_VERSION: u16 = 1;

/// Number of symbols in the default alphabet.
pub const DEFAULT_ALPHABET_SIZE: usize = 256;

/// Canonical code length of each byte value, indexed by symbol.
#[rustfmt::skip]
pub const DEFAULT_CODE_LENGTHS: [u8; DEFAULT_ALPHABET_SIZE] = [
    // 0x00
    14, 14, 14, 14, 14, 14, 14, 14, 14, 14, 8, 14, 14, 14, 14, 14,
    // 0x10
    14, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14,
    // 0x20 ' '
    3, 14, 10, 10, 14, 11, 13, 10, 8, 8, 8, 11, 7, 7, 7, 9,
    // 0x30 '0'
    8, 9, 9, 10, 9, 10, 11, 11, 11, 12, 8, 9, 13, 11, 11, 14,
    // 0x40 '@'
    14, 10, 9, 9, 11, 9, 11, 12, 11, 10, 14, 14, 11, 9, 10, 9,
    // 0x50 'P'
    11, 14, 9, 9, 10, 11, 13, 11, 13, 12, 14, 12, 14, 12, 14, 11,
    // 0x60 '`'
    8, 4, 6, 5, 5, 3, 6, 7, 6, 4, 13, 8, 5, 6, 4, 4,
    // 0x70 'p'
    6, 8, 4, 5, 4, 6, 8, 8, 8, 6, 10, 12, 10, 12, 13, 14,
    // 0x80
    9, 14, 14, 14, 14, 14, 10, 13, 14, 13, 14, 14, 14, 14, 14, 14,
    // 0x90
    14, 14, 10, 12, 9, 14, 14, 13, 14, 14, 14, 14, 14, 14, 14, 14,
    // 0xa0
    14, 14, 14, 14, 13, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14,
    // 0xb0
    14, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14,
    // 0xc0
    14, 14, 14, 13, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14, 12, 14,
    // 0xd0
    14, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14,
    // 0xe0
    14, 14, 9, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14,
    // 0xf0
    14, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14, 14,
];

/// The default alphabet: all byte values, ascending.
pub fn default_alphabet() -> Vec<u8> {
    (0..=u8::MAX).collect()
}
