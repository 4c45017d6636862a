//! Bit-level packing of encoded symbols.
//!
//! [`BitWriter`] packs bits MSB-first into bytes and finishes into an
//! [`EncodedStream`], which keeps the exact number of meaningful bits next
//! to the packed bytes. [`BitReader`] never reads past that length.
//!
//! # Padding Rules
//! - BitWriter: pads the final partial byte with trailing zeros
//! - BitReader: stops at the recorded bit length, padding is never visible
//!
//! # Example
//! ```
//! use huffcode_core::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(&[true, false, true]);
//! writer.write_bits(&[true, true]);
//! // 10111 -> packed as 10111000, bit length 5
//!
//! let stream = writer.finish();
//! assert_eq!(stream.bytes(), &[0b1011_1000]);
//! assert_eq!(stream.bit_len(), 5);
//!
//! let mut reader = BitReader::new(&stream);
//! let bits: Vec<bool> = std::iter::from_fn(|| reader.read_bit()).collect();
//! assert_eq!(bits, [true, false, true, true, true]);
//! ```

use crate::error::{BitIoError, Result};

/// Packed bits plus their exact length.
///
/// # Invariants
/// - `bytes.len() == bit_len.div_ceil(8)`
/// - padding bits in the last byte are zero
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedStream {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl EncodedStream {
    /// Wrap packed bytes with a known bit length.
    ///
    /// # Errors
    /// `BitIoError::InvalidBitCount` if `bit_len` needs a different number of
    /// bytes than supplied.
    pub fn from_parts(bytes: Vec<u8>, bit_len: usize) -> Result<Self> {
        if bytes.len() != bit_len.div_ceil(8) {
            return Err(BitIoError::InvalidBitCount {
                bits: bit_len,
                bytes: bytes.len(),
            }
            .into());
        }

        let mut stream = Self { bytes, bit_len };
        stream.clear_padding();
        Ok(stream)
    }

    fn clear_padding(&mut self) {
        let used = self.bit_len % 8;
        if used != 0 {
            if let Some(last) = self.bytes.last_mut() {
                *last &= 0xFF << (8 - used);
            }
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of meaningful bits.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// Space-separated decimal value of each 8-bit group.
    ///
    /// A final partial group is rendered after zero padding, so this form
    /// alone does not reveal `bit_len`.
    pub fn to_decimal_text(&self) -> String {
        let mut text = String::with_capacity(self.bytes.len() * 4);
        for byte in &self.bytes {
            text.push_str(&byte.to_string());
            text.push(' ');
        }
        text
    }

    /// Space-separated 8-bit groups; the final group holds only the bits
    /// that remain, so the length is self-describing.
    pub fn to_bit_text(&self) -> String {
        let mut text = String::with_capacity(self.bit_len + self.bytes.len());
        let mut reader = BitReader::new(self);
        let mut in_group = 0;
        while let Some(bit) = reader.read_bit() {
            text.push(if bit { '1' } else { '0' });
            in_group += 1;
            if in_group == 8 {
                text.push(' ');
                in_group = 0;
            }
        }
        if in_group > 0 {
            text.push(' ');
        }
        text
    }

    /// Parse the form produced by [`EncodedStream::to_bit_text`].
    ///
    /// Every group but the last must be exactly 8 bits.
    pub fn from_bit_text(text: &str) -> Result<Self> {
        let groups: Vec<&str> = text.split_whitespace().collect();
        let mut writer = BitWriter::new();

        for (i, group) in groups.iter().enumerate() {
            let is_last = i + 1 == groups.len();
            if group.len() > 8 || (!is_last && group.len() != 8) {
                return Err(BitIoError::MalformedGroup(group.to_string()).into());
            }
            for c in group.chars() {
                match c {
                    '0' => writer.write_bit(false),
                    '1' => writer.write_bit(true),
                    _ => return Err(BitIoError::MalformedGroup(group.to_string()).into()),
                }
            }
        }

        Ok(writer.finish())
    }
}

/// Writes bits MSB-first into a byte buffer.
///
/// # Invariants
/// - `bit_buffer` holds fewer than 8 pending bits, MSB-aligned
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.bit_buffer |= 0x80 >> self.bit_count;
        }
        self.bit_count += 1;

        if self.bit_count == 8 {
            self.bytes.push(self.bit_buffer);
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
    }

    /// Append a sequence of bits in order.
    pub fn write_bits(&mut self, bits: &[bool]) {
        for &bit in bits {
            self.write_bit(bit);
        }
    }

    /// Total number of bits written (including the partial byte).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }

    /// Flush the partial byte (zero-padded) and return the stream.
    pub fn finish(mut self) -> EncodedStream {
        let bit_len = self.bit_len();
        if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
        }
        EncodedStream {
            bytes: self.bytes,
            bit_len,
        }
    }
}

/// Reads bits MSB-first from an [`EncodedStream`], up to its bit length.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    stream: &'a EncodedStream,
    /// Current bit position (0 = MSB of first byte)
    bit_position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(stream: &'a EncodedStream) -> Self {
        Self {
            stream,
            bit_position: 0,
        }
    }

    /// Next bit, or `None` at the end of the meaningful bits.
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.bit_position >= self.stream.bit_len {
            return None;
        }
        let byte = self.stream.bytes[self.bit_position / 8];
        let bit = byte & (0x80 >> (self.bit_position % 8)) != 0;
        self.bit_position += 1;
        Some(bit)
    }

    /// Like [`BitReader::read_bit`], but running out is an error.
    pub fn require_bit(&mut self) -> Result<bool> {
        self.read_bit()
            .ok_or_else(|| BitIoError::UnexpectedEof.into())
    }

    pub fn bits_remaining(&self) -> usize {
        self.stream.bit_len - self.bit_position
    }

    /// Current bit position.
    pub fn position(&self) -> usize {
        self.bit_position
    }

    pub fn is_empty(&self) -> bool {
        self.bits_remaining() == 0
    }
}
