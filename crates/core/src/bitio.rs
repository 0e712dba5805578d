//! Bit-level I/O over byte streams.
//!
//! `BitWriter` packs `ByteSeq` codes into an underlying `io::Write` and
//! `BitReader` pulls single bits out of an `io::Read`. Both operate in
//! MSB-first order, which is standard for Huffman encoding.
//!
//! # Carry
//! The writer holds at most one partial byte between calls. Each call first
//! tops up that carry, then emits whole bytes, then keeps any remainder of
//! fewer than 8 bits as the new carry. `flush` must be called exactly once at
//! the end of the stream or the trailing bits are lost.
//!
//! # Padding Rules
//! - BitWriter: pads the final partial byte with trailing zeros
//! - BitReader: cannot tell padding from data (caller must track symbol count)
//!
//! # Example
//! ```
//! use huffpack_core::bitio::{BitReader, BitWriter};
//! use huffpack_core::byteseq::ByteSeq;
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write(ByteSeq::new(0b101, 3)).unwrap(); // 1, 0, 1
//! writer.write(ByteSeq::new(0b11, 2)).unwrap();  // 1, 1
//! assert_eq!(writer.flush().unwrap(), 5);
//! // Total: 10111 -> padded to 10111000
//!
//! let bytes = writer.into_inner();
//! assert_eq!(bytes, vec![0b1011_1000]);
//!
//! let mut reader = BitReader::new(&bytes[..]);
//! assert!(reader.read_bit().unwrap());
//! assert!(!reader.read_bit().unwrap());
//! ```

use std::io::{self, Read, Write};

use crate::byteseq::{mask, ByteSeq};
use crate::error::{BitIoError, Result};

/// Writes `ByteSeq` codes MSB-first into a byte sink.
///
/// # Invariants
/// - `carry_len` is always < 8
/// - unused low bits of `carry` are zero
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    out: W,
    /// Partial byte, MSB-aligned
    carry: u8,
    /// Number of meaningful bits in `carry` (0-7)
    carry_len: u32,
}

impl<W: Write> BitWriter<W> {
    /// Create a writer with an empty carry.
    pub fn new(out: W) -> Self {
        Self {
            out,
            carry: 0,
            carry_len: 0,
        }
    }

    /// Append all bits of `seq`, most-significant first.
    ///
    /// Returns the number of bits physically moved to the sink during this
    /// call, including the bits that completed a previous carry. This can be
    /// smaller than `seq.len()` when the tail is held back as the new carry.
    ///
    /// # Errors
    /// Propagates failures of the underlying writer.
    pub fn write(&mut self, seq: ByteSeq) -> Result<usize> {
        let moved = ((self.carry_len + seq.len()) / 8 * 8) as usize;

        let pattern = seq.pattern();
        let mut remaining = seq.len();
        // at most one topped-up carry plus eight whole bytes
        let mut staged = [0u8; 9];
        let mut staged_len = 0;

        if self.carry_len > 0 && remaining > 0 {
            let room = 8 - self.carry_len;
            let take = remaining.min(room);
            let bits = (pattern >> (remaining - take)) & mask(take);
            self.carry |= (bits << (room - take)) as u8;
            self.carry_len += take;
            remaining -= take;

            if self.carry_len == 8 {
                staged[staged_len] = self.carry;
                staged_len += 1;
                self.carry = 0;
                self.carry_len = 0;
            }
        }

        while remaining >= 8 {
            staged[staged_len] = ((pattern >> (remaining - 8)) & 0xff) as u8;
            staged_len += 1;
            remaining -= 8;
        }

        if remaining > 0 {
            self.carry = ((pattern & mask(remaining)) << (8 - remaining)) as u8;
            self.carry_len = remaining;
        }

        if staged_len > 0 {
            self.out.write_all(&staged[..staged_len])?;
        }

        log::trace!(
            "bit writer: {} bits in, {} bits out, carry {}",
            seq.len(),
            moved,
            self.carry_len
        );
        Ok(moved)
    }

    /// Emit the carry as a zero-padded byte.
    ///
    /// Returns the number of meaningful bits the byte contained (0 if there
    /// was no carry, in which case nothing is written).
    pub fn flush(&mut self) -> Result<usize> {
        let n = self.carry_len as usize;
        if self.carry_len > 0 {
            self.out.write_all(&[self.carry])?;
            self.carry = 0;
            self.carry_len = 0;
        }
        self.out.flush()?;
        Ok(n)
    }

    /// Number of bits currently held in the carry.
    pub fn carry_len(&self) -> u32 {
        self.carry_len
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Return the underlying sink. Any unflushed carry is dropped.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Reads bits MSB-first from a byte source, one byte buffered at a time.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    src: R,
    stored: u8,
    /// Unread bits left in `stored` (0-8)
    available: u32,
}

impl<R: Read> BitReader<R> {
    pub fn new(src: R) -> Self {
        Self {
            src,
            stored: 0,
            available: 0,
        }
    }

    /// Read one bit (`true` for 1).
    ///
    /// # Errors
    /// - `BitIoError::UnexpectedEof` once the source has no more bytes
    /// - `Error::Io` for any other read failure
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.available == 0 {
            self.fill()?;
        }
        self.available -= 1;
        Ok((self.stored >> self.available) & 1 == 1)
    }

    fn fill(&mut self) -> Result<()> {
        let mut buf = [0u8; 1];
        match self.src.read_exact(&mut buf) {
            Ok(()) => {
                self.stored = buf[0];
                self.available = 8;
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                Err(BitIoError::UnexpectedEof.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Bits still buffered from the last byte pulled off the source.
    pub fn buffered_bits(&self) -> u32 {
        self.available
    }

    /// Mutable access to the source, positioned just after the last byte
    /// consumed by this reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.src
    }

    pub fn into_inner(self) -> R {
        self.src
    }
}
