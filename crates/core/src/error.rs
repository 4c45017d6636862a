//! Error types for the huffcode system.
//!
//! All operations return structured errors rather than panicking. These are
//! logic and data errors; nothing here is transient, so callers never retry.

use thiserror::Error;

/// Top-level error type for all operations in the system.
///
/// Each variant corresponds to a specific failure domain:
/// - Alphabet: construction or parsing of the symbol set
/// - Tree: building a Huffman tree with nothing to build from
/// - Codec: encoding symbols outside the table, decoding garbage
/// - Verification: the decoded output differs from the source
/// - Bit I/O and framing: reading packed bits and the text artifact
#[derive(Debug, Error)]
pub enum Error {
    /// Tree construction was attempted with zero symbols
    #[error("empty alphabet: cannot build a huffman tree without symbols")]
    EmptyAlphabet,

    /// The same symbol was listed twice in an alphabet
    #[error("duplicate symbol {0:#04x} in alphabet")]
    DuplicateSymbol(u8),

    /// Alphabet specification string could not be parsed
    #[error("invalid alphabet: {0}")]
    InvalidAlphabet(String),

    /// A source byte has no entry in the code table (strict policy)
    #[error("unknown symbol {symbol:#04x} at source position {position}")]
    UnknownSymbol { symbol: u8, position: usize },

    /// Accumulated bits do not match any code
    #[error("no matching code for bits ending at position {position}")]
    NoMatchingCode { position: usize },

    /// Decoded output differs from the original source
    #[error(
        "round trip mismatch: expected {expected_len} bytes, got {actual_len} \
         (first difference at {first_difference})"
    )]
    RoundTripMismatch {
        expected_len: usize,
        actual_len: usize,
        first_difference: usize,
    },

    /// Bit I/O operation failed
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Encoded artifact could not be parsed
    #[error("framing error: {0}")]
    Framing(#[from] FramingError),

    /// CRC validation failed, indicating a corrupted artifact
    #[error("CRC mismatch: expected {expected:#010x}, got {actual:#010x}")]
    Crc { expected: u32, actual: u32 },

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bit-level I/O errors.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// Attempted to read past the recorded bit length
    #[error("unexpected end of bit stream")]
    UnexpectedEof,

    /// Bit length does not fit the packed bytes it describes
    #[error("invalid bit count {bits} for {bytes} packed bytes")]
    InvalidBitCount { bits: usize, bytes: usize },

    /// A bit-text group contained something other than `0`/`1`, or more than 8 bits
    #[error("malformed bit group {0:?}")]
    MalformedGroup(String),
}

/// Encoded artifact framing errors.
#[derive(Debug, Error)]
pub enum FramingError {
    /// First header token is not the expected magic
    #[error("invalid magic: expected {expected:?}, got {actual:?}")]
    InvalidMagic { expected: &'static str, actual: String },

    /// Header line is missing or has the wrong shape
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// A payload token is not a decimal byte value
    #[error("invalid byte token {token:?}")]
    InvalidByte { token: String },

    /// Payload has a different number of bytes than the header announced
    #[error("byte count mismatch: header says {expected}, got {actual}")]
    ByteCountMismatch { expected: usize, actual: usize },

    /// Header bit length cannot be represented by the byte count
    #[error("bit length {bits} out of range for {bytes} bytes")]
    BitLengthOutOfRange { bits: usize, bytes: usize },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
