//! Encoding and decoding with a code table.
//!
//! Encoding concatenates the code of every source byte into an
//! [`EncodedStream`]. Decoding reads that stream one bit at a time, growing
//! an accumulator until it equals some code, then emits that code's symbol
//! and starts over. Decoding stops exactly at the stream's recorded bit
//! length, so zero padding in the final byte is never mistaken for data.

use crate::bitio::{BitReader, BitWriter, EncodedStream};
use crate::code::{Code, CodeTable};
use crate::error::{Error, Result};

/// What to do with a source byte that has no code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownSymbolPolicy {
    /// Fail with `Error::UnknownSymbol`
    #[default]
    Strict,
    /// Leave the byte out of the stream and log a warning
    Skip,
}

/// Encode `source` with `table`.
///
/// # Errors
/// `Error::UnknownSymbol` under [`UnknownSymbolPolicy::Strict`] when a byte
/// has no entry in `table`.
pub fn encode(
    source: &[u8],
    table: &CodeTable,
    policy: UnknownSymbolPolicy,
) -> Result<EncodedStream> {
    let mut writer = BitWriter::new();
    let mut skipped = 0usize;

    for (position, &symbol) in source.iter().enumerate() {
        match table.get(symbol) {
            Some(code) => writer.write_bits(code.bits()),
            None => match policy {
                UnknownSymbolPolicy::Strict => {
                    return Err(Error::UnknownSymbol { symbol, position });
                }
                UnknownSymbolPolicy::Skip => skipped += 1,
            },
        }
    }

    if skipped > 0 {
        log::warn!(
            "skipped {} of {} source bytes with no code; they will be missing after decoding",
            skipped,
            source.len()
        );
    }

    let stream = writer.finish();
    log::debug!(
        "encoded {} bytes into {} bits ({} packed bytes)",
        source.len() - skipped,
        stream.bit_len(),
        stream.bytes().len()
    );
    Ok(stream)
}

/// Decode `stream` with `table`.
///
/// # Errors
/// `Error::NoMatchingCode` if the accumulated bits grow longer than the
/// longest code without matching, or if the stream ends in the middle of a
/// code. Both mean the stream is corrupt or was encoded with another table.
pub fn decode(stream: &EncodedStream, table: &CodeTable) -> Result<Vec<u8>> {
    let mut reader = BitReader::new(stream);
    let mut decoded = Vec::new();
    let mut pending = Code::new();

    while let Some(bit) = reader.read_bit() {
        pending.push(bit);

        if let Some(symbol) = table.symbol_for(&pending) {
            decoded.push(symbol);
            pending.clear();
        } else if pending.len() >= table.max_code_len() {
            return Err(Error::NoMatchingCode {
                position: reader.position(),
            });
        }
    }

    if !pending.is_empty() {
        return Err(Error::NoMatchingCode {
            position: reader.position(),
        });
    }

    log::debug!(
        "decoded {} bits into {} bytes",
        stream.bit_len(),
        decoded.len()
    );
    Ok(decoded)
}
