//! huffpack-core: byte-oriented Huffman compression with a self-describing container
//!
//! This library provides:
//! - Frequency analysis and Huffman tree construction
//! - Canonical code assignment and a compact code-length descriptor
//! - Bit-granular stream encoding and decoding over `std::io`
//! - A versioned container with an optional embedded model and CRC-32 trailer
//!
//! # Architecture
//!
//! - `byteseq`: variable-length bit patterns (codes)
//! - `bitio`: packing bit patterns into bytes and reading them back
//! - `frequency`: symbol counts and relative frequencies
//! - `pqueue`: deterministic min-priority queue used by the tree builder
//! - `tree`: arena-backed Huffman tree, built from frequencies or codes
//! - `codebook`: symbol to code mapping and canonical assignment
//! - `model`: alphabet + codebook + decode tree, with (un)marshalling
//! - `default_model`: the pinned model used when none is embedded
//! - `stream`: symbol `Writer` / `Reader`
//! - `container`: header, descriptor and trailer around a symbol stream
//! - `metrics`: per-session byte accounting
//!
//! # Example
//! ```
//! use huffpack_core::{compress, decompress, Flags};
//!
//! let data = b"so much depends upon a red wheel barrow";
//! let packed = compress(data, Flags::CHECKSUM).unwrap();
//! assert_eq!(decompress(&packed).unwrap(), data);
//! ```

pub mod bitio;
pub mod byteseq;
pub mod codebook;
pub mod container;
pub mod default_model;
pub mod error;
pub mod frequency;
pub mod metrics;
pub mod model;
pub mod pqueue;
pub mod stream;
pub mod tree;

// Re-export commonly used types
pub use byteseq::ByteSeq;
pub use codebook::Codebook;
pub use container::{compress, decompress, Decoder, Encoder, Flags, Header, FORMAT_VERSION};
pub use error::{BitIoError, ContainerError, Error, HuffmanError, Result};
pub use frequency::{build_frequency_table, FrequencyTable};
pub use metrics::CodecMetrics;
pub use model::Model;
pub use stream::{Reader, Writer};
pub use tree::HuffmanTree;
