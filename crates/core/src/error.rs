//! Error types for the huffpack codec.
//!
//! Every fallible operation returns a structured error. Nothing is retried
//! internally: once a bit-level operation fails the stream position is
//! unknown, so recovery is left to the caller at whole-stream granularity.

use thiserror::Error;

/// Top-level error type for all codec operations.
///
/// Each variant corresponds to a failure domain:
/// - Bit I/O: reading bits past the end of the source
/// - Huffman: model, tree, codebook and symbol stream failures
/// - Container: header parsing and payload framing
/// - CRC: checksum trailer did not match the decoded bytes
/// - I/O: the underlying reader or writer failed
#[derive(Debug, Error)]
pub enum Error {
    /// Bit I/O operation failed (e.g., reading past end of stream)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Huffman codec error (unknown symbol, corrupt tree, bad descriptor)
    #[error("huffman codec error: {0}")]
    Huffman(#[from] HuffmanError),

    /// Container framing error
    #[error("container error: {0}")]
    Container(#[from] ContainerError),

    /// Checksum trailer did not match the decoded data
    #[error("CRC mismatch: expected {expected:#010x}, got {actual:#010x}")]
    Crc { expected: u32, actual: u32 },

    /// Underlying stream error, including short reads
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bit-level I/O errors.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// All buffered and source bits have been consumed
    #[error("unexpected end of bit stream")]
    UnexpectedEof,
}

/// Huffman model and symbol stream errors.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// Byte is not part of the active model's alphabet
    #[error("symbol {symbol:#04x} is not in the alphabet")]
    UnknownSymbol { symbol: u8 },

    /// Decode walked to a child that does not exist in the tree
    #[error("corrupt huffman tree: missing child after {symbols_decoded} symbols")]
    CorruptTree { symbols_decoded: usize },

    /// Priority queue did not reduce to exactly one root
    #[error("huffman tree construction left {roots} roots, expected 1")]
    TreeConstruction { roots: usize },

    /// Alphabet and length table are not the same size
    #[error("alphabet has {alphabet} symbols but {lengths} code lengths were given")]
    SizeMismatch { alphabet: usize, lengths: usize },

    /// Symbol appears twice in an alphabet
    #[error("duplicate symbol {symbol:#04x} in alphabet")]
    DuplicateSymbol { symbol: u8 },

    /// Code length does not fit the one-byte descriptor format
    #[error("code length {length} exceeds maximum 255")]
    CodeLengthTooLong { length: usize },

    /// Code lengths do not describe a valid prefix code
    #[error("invalid code lengths: symbol {symbol:#04x} cannot be assigned a {length}-bit code")]
    InvalidCodeLengths { symbol: u8, length: u32 },
}

/// Container header and payload errors.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// Header carries a format version this build does not understand
    #[error("unsupported format version {found:#06x}, expected {expected:#06x}")]
    UnsupportedVersion { expected: u16, found: u16 },

    /// Fewer symbols decoded than the header declared
    #[error("payload truncated: header declares {expected} symbols, decoded {actual}")]
    PayloadTruncated { expected: u64, actual: u64 },

    /// Embedded models must be built over the default alphabet
    #[error("embedded model alphabet has {actual} symbols, default alphabet has {expected}")]
    AlphabetMismatch { expected: usize, actual: usize },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
