//! End-to-end run: count, build, assign, encode, frame, parse, decode, verify.
//!
//! The decode half deliberately starts from the framed text artifact rather
//! than the in-memory stream, so a run exercises exactly what a reader of
//! the written files would see.

use crate::alphabet::Alphabet;
use crate::bitio::EncodedStream;
use crate::code::{assign_codes, CodeTable};
use crate::codec::{decode, encode, UnknownSymbolPolicy};
use crate::error::{Error, Result};
use crate::framing::{frame_decimal, parse_decimal};
use crate::frequency::FrequencyModel;
use crate::metrics::{self, RunReport};
use crate::tree::HuffmanTree;

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct Run {
    /// Stats with codes filled in, in decreasing probability order
    pub model: FrequencyModel,
    pub table: CodeTable,
    pub stream: EncodedStream,
    /// Framed decimal artifact text
    pub decimal_artifact: String,
    /// Raw bit-group artifact text
    pub bit_artifact: String,
    pub decoded: Vec<u8>,
    pub report: RunReport,
}

/// Build a code for `source` over `alphabet` and drive it through a full
/// encode/decode cycle.
///
/// A decode that differs from the source (with out-of-alphabet bytes removed
/// under the skip policy) is not an error: the run is returned with
/// `report.round_trip_ok` false.
///
/// # Errors
/// - `Error::EmptyAlphabet` if `alphabet` has no symbols
/// - `Error::UnknownSymbol` for out-of-alphabet bytes under the strict policy
/// - framing and decoding errors from the artifact round trip
pub fn run(source: &[u8], alphabet: &Alphabet, policy: UnknownSymbolPolicy) -> Result<Run> {
    let mut model = FrequencyModel::count(source, alphabet);
    log::debug!(
        "counted {} of {} source bytes over a {}-symbol alphabet",
        model.counted_len(),
        model.total_len(),
        alphabet.len()
    );

    let tree = HuffmanTree::build(&model.weights())?;
    let table = assign_codes(&tree, &mut model);

    let stream = encode(source, &table, policy)?;
    let decimal_artifact = frame_decimal(&stream);
    let bit_artifact = stream.to_bit_text();

    let reread = parse_decimal(&decimal_artifact)?;
    let decoded = decode(&reread, &table)?;

    let expected: Vec<u8> = match policy {
        UnknownSymbolPolicy::Strict => source.to_vec(),
        UnknownSymbolPolicy::Skip => source
            .iter()
            .copied()
            .filter(|&b| table.get(b).is_some())
            .collect(),
    };
    let report = build_report(&model, &stream, &bit_artifact, &expected, &decoded);

    log::info!(
        "encoded {} bytes into {} bits (entropy {:.4}, average code length {:.4} bits/symbol)",
        report.source_len,
        report.encoded_bits,
        report.entropy,
        report.average_code_length
    );

    Ok(Run {
        model,
        table,
        stream,
        decimal_artifact,
        bit_artifact,
        decoded,
        report,
    })
}

/// Sizes, measures and the round-trip verdict of one run.
fn build_report(
    model: &FrequencyModel,
    stream: &EncodedStream,
    bit_artifact: &str,
    expected: &[u8],
    decoded: &[u8],
) -> RunReport {
    let round_trip_ok = match verify(expected, decoded) {
        Ok(()) => true,
        Err(e) => {
            log::error!("round trip failed: {e}");
            false
        }
    };

    RunReport {
        source_len: model.total_len(),
        encoded_bits: stream.bit_len() as u64,
        packed_bytes: stream.bytes().len() as u64,
        decimal_text_len: stream.to_decimal_text().len() as u64,
        bit_text_len: bit_artifact.len() as u64,
        entropy: metrics::entropy(model.stats()),
        average_code_length: metrics::average_code_length(model.stats()),
        round_trip_ok,
    }
}

/// Compare decoded output with what was expected.
///
/// # Errors
/// `Error::RoundTripMismatch` naming the first differing position.
pub fn verify(expected: &[u8], actual: &[u8]) -> Result<()> {
    if expected == actual {
        return Ok(());
    }

    let first_difference = expected
        .iter()
        .zip(actual)
        .position(|(e, a)| e != a)
        .unwrap_or_else(|| expected.len().min(actual.len()));

    Err(Error::RoundTripMismatch {
        expected_len: expected.len(),
        actual_len: actual.len(),
        first_difference,
    })
}
