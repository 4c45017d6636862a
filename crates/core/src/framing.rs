//! Decimal artifact framing.
//!
//! The decimal text form of an encoded stream loses the exact bit length:
//! the final 8-bit group is zero-padded, and nothing in the digits says how
//! many of its bits are real. The framed artifact puts that length (and a
//! checksum) on a header line in front of the digits.
//!
//! # Artifact Format
//!
//! ```text
//! HUFD <bit_len> <byte_count> <crc32>\n
//! <byte> <byte> ... <byte> \n
//! ```
//!
//! - `bit_len`: meaningful bits in the stream, decimal
//! - `byte_count`: number of byte tokens on line 2, decimal
//! - `crc32`: 8 lowercase hex digits
//! - line 2: each byte as a decimal value followed by one space
//!
//! # CRC Coverage
//!
//! The CRC32 covers:
//! - bit_len (u64 little-endian)
//! - byte_count (u64 little-endian)
//! - the packed bytes

use crate::bitio::EncodedStream;
use crate::error::{Error, FramingError, Result};

/// Magic token opening the header line.
const MAGIC: &str = "HUFD";

/// Render `stream` as a framed decimal artifact.
pub fn frame_decimal(stream: &EncodedStream) -> String {
    let bytes = stream.bytes();
    let crc32 = compute_crc(stream.bit_len() as u64, bytes.len() as u64, bytes);

    let mut text = format!(
        "{MAGIC} {} {} {:08x}\n",
        stream.bit_len(),
        bytes.len(),
        crc32
    );
    text.push_str(&stream.to_decimal_text());
    text.push('\n');
    text
}

/// Parse a framed decimal artifact back into a stream.
///
/// # Errors
/// - `FramingError::InvalidMagic` if the header does not start with `HUFD`
/// - `FramingError::MalformedHeader` if header fields are missing or not numbers
/// - `FramingError::InvalidByte` if a payload token is not in `0..=255`
/// - `FramingError::ByteCountMismatch` if the payload has the wrong number of tokens
/// - `FramingError::BitLengthOutOfRange` if `bit_len` does not fit the byte count
/// - `Error::Crc` if the checksum does not match
pub fn parse_decimal(text: &str) -> Result<EncodedStream> {
    let (header, payload) = match text.split_once('\n') {
        Some(parts) => parts,
        None => (text, ""),
    };

    let mut fields = header.split_whitespace();

    let magic = fields
        .next()
        .ok_or_else(|| FramingError::MalformedHeader("empty header line".to_string()))?;
    if magic != MAGIC {
        return Err(FramingError::InvalidMagic {
            expected: MAGIC,
            actual: magic.to_string(),
        }
        .into());
    }

    let bit_len: usize = parse_field(fields.next(), "bit length")?;
    let byte_count: usize = parse_field(fields.next(), "byte count")?;
    let crc32 = fields
        .next()
        .and_then(|f| u32::from_str_radix(f, 16).ok())
        .ok_or_else(|| FramingError::MalformedHeader("missing or invalid crc32".to_string()))?;
    if let Some(extra) = fields.next() {
        return Err(FramingError::MalformedHeader(format!("unexpected field {extra:?}")).into());
    }

    if bit_len.div_ceil(8) != byte_count {
        return Err(FramingError::BitLengthOutOfRange {
            bits: bit_len,
            bytes: byte_count,
        }
        .into());
    }

    let bytes = payload
        .split_whitespace()
        .map(|token| {
            token.parse::<u8>().map_err(|_| FramingError::InvalidByte {
                token: token.to_string(),
            })
        })
        .collect::<std::result::Result<Vec<u8>, FramingError>>()?;

    if bytes.len() != byte_count {
        return Err(FramingError::ByteCountMismatch {
            expected: byte_count,
            actual: bytes.len(),
        }
        .into());
    }

    let computed_crc = compute_crc(bit_len as u64, byte_count as u64, &bytes);
    if computed_crc != crc32 {
        return Err(Error::Crc {
            expected: crc32,
            actual: computed_crc,
        });
    }

    EncodedStream::from_parts(bytes, bit_len)
}

fn parse_field(field: Option<&str>, name: &str) -> Result<usize> {
    field
        .and_then(|f| f.parse().ok())
        .ok_or_else(|| FramingError::MalformedHeader(format!("missing or invalid {name}")).into())
}

/// Compute CRC32 over the protected fields.
fn compute_crc(bit_len: u64, byte_count: u64, bytes: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();

    hasher.update(&bit_len.to_le_bytes());
    hasher.update(&byte_count.to_le_bytes());
    hasher.update(bytes);

    hasher.finalize()
}
