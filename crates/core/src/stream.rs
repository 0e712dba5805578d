//! Symbol streams: bytes to packed codes and back.
//!
//! `Writer` looks up each byte's code in a `Model` and pushes it through a
//! `BitWriter`. `Reader` walks the model's decode tree one bit at a time,
//! restarting at the root after every emitted symbol.
//!
//! # Example
//! ```
//! use huffpack_core::model::Model;
//! use huffpack_core::stream::{Reader, Writer};
//!
//! let model = Model::create_from_text(b"aaaaaaaaaabbbbbccccc").unwrap();
//!
//! let mut writer = Writer::new(Vec::new(), &model);
//! writer.write(b"abc").unwrap();
//! assert_eq!(writer.bits_written(), 5);
//! let encoded = writer.close().unwrap();
//! assert_eq!(encoded, vec![0x58]);
//!
//! let mut reader = Reader::new(&encoded[..], &model);
//! let mut decoded = [0u8; 3];
//! reader.read(&mut decoded).unwrap();
//! assert_eq!(&decoded, b"abc");
//! ```

use std::io::{Read, Write};

use crate::bitio::{BitReader, BitWriter};
use crate::error::{HuffmanError, Result};
use crate::model::Model;

/// Encodes bytes into a bit-packed stream.
///
/// The stream is only complete after `close`, which flushes the final
/// partial byte.
pub struct Writer<'m, W: Write> {
    bits: BitWriter<W>,
    model: &'m Model,
    bits_written: u64,
    symbols_written: u64,
}

impl<'m, W: Write> Writer<'m, W> {
    pub fn new(out: W, model: &'m Model) -> Self {
        Self {
            bits: BitWriter::new(out),
            model,
            bits_written: 0,
            symbols_written: 0,
        }
    }

    /// Encode every byte of `bytes`.
    ///
    /// Returns the number of bytes encoded.
    ///
    /// # Errors
    /// Stops at the first byte outside the model's alphabet with
    /// `HuffmanError::UnknownSymbol`. Codes already written stay in the
    /// stream; nothing is rolled back.
    pub fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        for &byte in bytes {
            let code = self.model.get_pattern(byte)?;
            self.bits.write(code)?;
            self.bits_written += code.len() as u64;
            self.symbols_written += 1;
        }
        Ok(bytes.len())
    }

    /// Total code bits emitted so far, padding excluded.
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    pub fn symbols_written(&self) -> u64 {
        self.symbols_written
    }

    /// Flush the last partial byte and hand back the sink.
    pub fn close(mut self) -> Result<W> {
        let tail = self.bits.flush()?;
        log::trace!(
            "closed symbol stream: {} symbols, {} bits, {} bits in final byte",
            self.symbols_written,
            self.bits_written,
            tail
        );
        Ok(self.bits.into_inner())
    }
}

/// Decodes symbols from a bit-packed stream.
pub struct Reader<'m, R: Read> {
    bits: BitReader<R>,
    model: &'m Model,
    symbols_read: u64,
    bits_read: u64,
}

impl<'m, R: Read> Reader<'m, R> {
    pub fn new(src: R, model: &'m Model) -> Self {
        Self {
            bits: BitReader::new(src),
            model,
            symbols_read: 0,
            bits_read: 0,
        }
    }

    /// Decode a single symbol.
    ///
    /// Only the bits of this symbol's code are consumed, so the source is
    /// never read past the byte holding the final code bit.
    ///
    /// # Errors
    /// - `HuffmanError::CorruptTree` if the path leads to a missing child
    /// - `BitIoError::UnexpectedEof` if the bits run out mid-code
    pub fn read_symbol(&mut self) -> Result<u8> {
        let tree = self.model.tree();
        let corrupt = || HuffmanError::CorruptTree {
            symbols_decoded: self.symbols_read as usize,
        };

        let mut node = tree.root().ok_or_else(corrupt)?;
        let symbol = loop {
            if let Some(symbol) = tree.node(node).symbol() {
                break symbol;
            }
            let bit = self.bits.read_bit()?;
            self.bits_read += 1;
            node = tree.child(node, bit).ok_or_else(corrupt)?;
        };

        self.symbols_read += 1;
        Ok(symbol)
    }

    /// Fill `buf` with decoded symbols.
    ///
    /// Returns `buf.len()` on success. On error the symbols decoded before
    /// the failure are left in `buf`; `symbols_read` tells how many.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        for slot in buf.iter_mut() {
            *slot = self.read_symbol()?;
        }
        Ok(buf.len())
    }

    pub fn symbols_read(&self) -> u64 {
        self.symbols_read
    }

    /// Code bits consumed so far.
    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }

    /// Mutable access to the source, positioned after the last consumed byte.
    pub fn get_mut(&mut self) -> &mut R {
        self.bits.get_mut()
    }

    pub fn into_inner(self) -> R {
        self.bits.into_inner()
    }
}
