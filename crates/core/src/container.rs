//! Self-describing container around a model and a symbol stream.
//!
//! # Container Format
//!
//! ```text
//! +----------------------+
//! | version (2)          |  u16 little-endian, FORMAT_VERSION
//! +----------------------+
//! | flags (2)            |  u16 bitmask, bit 0 = model embedded,
//! |                      |               bit 1 = checksum trailer
//! +----------------------+
//! | payload_len (8)      |  u64 number of symbols (bytes), not bits
//! +----------------------+
//! | model descriptor     |  only with MODEL_EMBEDDED: one code length
//! | (256)                |  per default-alphabet symbol, ascending
//! +----------------------+
//! | payload              |  bit-packed codes, final byte zero-padded
//! | (variable)           |
//! +----------------------+
//! | crc32 (4)            |  only with CHECKSUM: CRC-32 of the raw bytes
//! +----------------------+
//! ```
//!
//! Without an embedded model both ends use the pinned default model, so the
//! default code-length table is part of this format.

use std::fmt;
use std::io::{Read, Write};
use std::ops::BitOr;

use crate::default_model::{default_alphabet, DEFAULT_ALPHABET_SIZE};
use crate::error::{BitIoError, ContainerError, Error, Result};
use crate::metrics::CodecMetrics;
use crate::model::Model;
use crate::stream::{Reader, Writer};

/// Container format version written to and expected in every header.
pub const FORMAT_VERSION: u16 = 0x53;

/// Size of the fixed header in bytes
pub const HEADER_SIZE: usize = 12;

/// Size of the checksum trailer in bytes
pub const TRAILER_SIZE: usize = 4;

/// Largest buffer reserved up front from an untrusted payload length
const MAX_PREALLOCATION: usize = 1 << 20;

/// Header flag bitmask.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flags(u16);

impl Flags {
    pub const NONE: Flags = Flags(0);
    /// A model descriptor follows the header
    pub const MODEL_EMBEDDED: Flags = Flags(0x0001);
    /// A CRC-32 of the raw bytes follows the payload
    pub const CHECKSUM: Flags = Flags(0x0002);

    const KNOWN: u16 = Self::MODEL_EMBEDDED.0 | Self::CHECKSUM.0;

    pub const fn from_bits(bits: u16) -> Self {
        Flags(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Bits set that this version does not define.
    pub const fn unknown_bits(self) -> u16 {
        self.0 & !Self::KNOWN
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl fmt::Debug for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Vec::new();
        if self.contains(Flags::MODEL_EMBEDDED) {
            names.push("MODEL_EMBEDDED");
        }
        if self.contains(Flags::CHECKSUM) {
            names.push("CHECKSUM");
        }
        write!(f, "Flags({:#06x}", self.0)?;
        if !names.is_empty() {
            write!(f, ": {}", names.join(" | "))?;
        }
        f.write_str(")")
    }
}

/// Fixed container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub version: u16,
    pub flags: Flags,
    /// Number of symbols in the payload
    pub payload_len: u64,
}

impl Header {
    pub fn new(flags: Flags, payload_len: u64) -> Self {
        Self {
            version: FORMAT_VERSION,
            flags,
            payload_len,
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..2].copy_from_slice(&self.version.to_le_bytes());
        bytes[2..4].copy_from_slice(&self.flags.bits().to_le_bytes());
        bytes[4..12].copy_from_slice(&self.payload_len.to_le_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8; HEADER_SIZE]) -> Self {
        Self {
            version: u16::from_le_bytes([bytes[0], bytes[1]]),
            flags: Flags::from_bits(u16::from_le_bytes([bytes[2], bytes[3]])),
            payload_len: u64::from_le_bytes([
                bytes[4], bytes[5], bytes[6], bytes[7], bytes[8], bytes[9], bytes[10], bytes[11],
            ]),
        }
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        out.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// Read and validate a header.
    ///
    /// # Errors
    /// - `Error::Io` on a short read
    /// - `ContainerError::UnsupportedVersion` for any other version
    pub fn read_from<R: Read>(src: &mut R) -> Result<Self> {
        let mut bytes = [0u8; HEADER_SIZE];
        src.read_exact(&mut bytes)?;
        let header = Self::from_bytes(&bytes);

        if header.version != FORMAT_VERSION {
            return Err(ContainerError::UnsupportedVersion {
                expected: FORMAT_VERSION,
                found: header.version,
            }
            .into());
        }
        if header.flags.unknown_bits() != 0 {
            log::warn!(
                "ignoring unknown container flags {:#06x}",
                header.flags.unknown_bits()
            );
        }
        Ok(header)
    }
}

/// Writes containers to a byte sink using one model.
pub struct Encoder<W: Write> {
    out: W,
    model: Model,
    metrics: CodecMetrics,
}

impl<W: Write> Encoder<W> {
    /// Encoder using the pinned default model.
    pub fn new(out: W) -> Result<Self> {
        Ok(Self::with_model(out, Model::default_model()?))
    }

    /// Encoder using a caller-supplied model.
    ///
    /// The model may only be embedded if it was built over the default
    /// alphabet, since that is the alphabet the decoder pairs the
    /// descriptor with.
    pub fn with_model(out: W, model: Model) -> Self {
        Self {
            out,
            model,
            metrics: CodecMetrics::new(),
        }
    }

    /// Write one complete container holding `bytes`.
    ///
    /// Returns the number of bytes encoded.
    ///
    /// # Errors
    /// - `ContainerError::AlphabetMismatch` if `MODEL_EMBEDDED` is requested
    ///   for a model that is not over the default alphabet (checked before
    ///   anything is written)
    /// - `HuffmanError::UnknownSymbol` for a byte outside the model
    /// - `Error::Io` for sink failures
    pub fn encode(&mut self, bytes: &[u8], flags: Flags) -> Result<usize> {
        self.metrics = CodecMetrics::new();

        let descriptor = if flags.contains(Flags::MODEL_EMBEDDED) {
            if self.model.alphabet() != default_alphabet().as_slice() {
                return Err(ContainerError::AlphabetMismatch {
                    expected: DEFAULT_ALPHABET_SIZE,
                    actual: self.model.alphabet().len(),
                }
                .into());
            }
            Some(self.model.marshal()?)
        } else {
            None
        };

        let header = Header::new(flags, bytes.len() as u64);
        header.write_to(&mut self.out)?;
        self.metrics.header_bytes = HEADER_SIZE as u64;
        log::debug!("writing container header {:?}", header);

        if let Some(descriptor) = descriptor {
            self.out.write_all(&descriptor)?;
            self.metrics.model_bytes = descriptor.len() as u64;
        }

        let mut writer = Writer::new(&mut self.out, &self.model);
        let n = writer.write(bytes)?;
        let bits = writer.bits_written();
        writer.close()?;
        self.metrics.payload_bits = bits;
        self.metrics.payload_bytes = bits.div_ceil(8);

        if flags.contains(Flags::CHECKSUM) {
            let crc = crc32fast::hash(bytes);
            self.out.write_all(&crc.to_le_bytes())?;
            self.metrics.trailer_bytes = TRAILER_SIZE as u64;
        }

        self.out.flush()?;
        self.metrics.raw_bytes = n as u64;
        self.metrics.complete();
        log::debug!(
            "encoded {} symbols into {} bytes",
            n,
            self.metrics.container_bytes()
        );
        Ok(n)
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Metrics of the last `encode` call.
    pub fn metrics(&self) -> &CodecMetrics {
        &self.metrics
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Reads containers from a byte source.
pub struct Decoder<R: Read> {
    src: R,
    metrics: CodecMetrics,
}

impl<R: Read> Decoder<R> {
    pub fn new(src: R) -> Self {
        Self {
            src,
            metrics: CodecMetrics::new(),
        }
    }

    /// Read one complete container and return the original bytes.
    ///
    /// # Errors
    /// - `Error::Io` if the header or descriptor is cut short
    /// - `ContainerError::UnsupportedVersion` for a foreign header
    /// - `ContainerError::PayloadTruncated` if the payload ends before the
    ///   declared number of symbols was decoded
    /// - `HuffmanError::CorruptTree` if the payload does not fit the model
    /// - `Error::Crc` if the checksum trailer does not match
    pub fn decode(&mut self) -> Result<Vec<u8>> {
        self.metrics = CodecMetrics::new();

        let header = Header::read_from(&mut self.src)?;
        self.metrics.header_bytes = HEADER_SIZE as u64;
        log::debug!("read container header {:?}", header);

        let model = if header.flags.contains(Flags::MODEL_EMBEDDED) {
            let mut lengths = vec![0u8; DEFAULT_ALPHABET_SIZE];
            self.src.read_exact(&mut lengths)?;
            self.metrics.model_bytes = lengths.len() as u64;
            Model::unmarshal(&default_alphabet(), &lengths)?
        } else {
            Model::default_model()?
        };

        let expected = header.payload_len;
        let hint = usize::try_from(expected)
            .unwrap_or(usize::MAX)
            .min(MAX_PREALLOCATION);
        let mut out = Vec::with_capacity(hint);

        let mut reader = Reader::new(&mut self.src, &model);
        while (out.len() as u64) < expected {
            match reader.read_symbol() {
                Ok(symbol) => out.push(symbol),
                Err(Error::BitIo(BitIoError::UnexpectedEof)) => {
                    return Err(ContainerError::PayloadTruncated {
                        expected,
                        actual: out.len() as u64,
                    }
                    .into());
                }
                Err(e) => return Err(e),
            }
        }
        let bits = reader.bits_read();
        self.metrics.payload_bits = bits;
        self.metrics.payload_bytes = bits.div_ceil(8);

        if header.flags.contains(Flags::CHECKSUM) {
            let mut trailer = [0u8; TRAILER_SIZE];
            self.src.read_exact(&mut trailer)?;
            self.metrics.trailer_bytes = TRAILER_SIZE as u64;

            let expected = u32::from_le_bytes(trailer);
            let actual = crc32fast::hash(&out);
            if expected != actual {
                return Err(Error::Crc { expected, actual });
            }
        }

        self.metrics.raw_bytes = out.len() as u64;
        self.metrics.complete();
        Ok(out)
    }

    /// Metrics of the last `decode` call.
    pub fn metrics(&self) -> &CodecMetrics {
        &self.metrics
    }

    pub fn into_inner(self) -> R {
        self.src
    }
}

/// Compress `bytes` into a new in-memory container.
///
/// With `MODEL_EMBEDDED` the model is fitted to `bytes` over the default
/// alphabet and shipped in the container; otherwise the default model is
/// used and nothing but the header precedes the payload.
pub fn compress(bytes: &[u8], flags: Flags) -> Result<Vec<u8>> {
    let model = if flags.contains(Flags::MODEL_EMBEDDED) {
        Model::fit_to_alphabet(&default_alphabet(), bytes)?
    } else {
        Model::default_model()?
    };

    let mut encoder = Encoder::with_model(Vec::new(), model);
    encoder.encode(bytes, flags)?;
    Ok(encoder.into_inner())
}

/// Decompress an in-memory container.
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
    Decoder::new(bytes).decode()
}
