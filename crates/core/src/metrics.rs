//! Information-theoretic measures and run reporting.
//!
//! - Source entropy: the lower bound on bits per symbol
//! - Average code length: what the assigned code actually spends
//! - Run report: sizes of every artifact plus the round-trip verdict
//!
//! All functions here are pure readers of [`SymbolStats`]; they never fail.
//! Empty input yields zero.

use crate::frequency::SymbolStats;

/// Shannon entropy in bits per symbol: `Σ -p·log2(p)` over `p > 0`.
pub fn entropy(stats: &[SymbolStats]) -> f64 {
    stats
        .iter()
        .map(|s| s.probability)
        .filter(|&p| p > 0.0)
        .map(|p| -p * p.log2())
        .sum()
}

/// Expected code length in bits per symbol: `Σ p·len(code)`.
///
/// Symbols without an assigned code contribute nothing.
pub fn average_code_length(stats: &[SymbolStats]) -> f64 {
    stats
        .iter()
        .map(|s| s.probability * s.code_len() as f64)
        .sum()
}

/// Exact encoded size in bits: `Σ count·len(code)`.
pub fn encoded_bit_len(stats: &[SymbolStats]) -> u64 {
    stats.iter().map(|s| s.count * s.code_len() as u64).sum()
}

/// Summary of one encode/decode run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Bytes in the source, including any outside the alphabet
    pub source_len: u64,

    /// Meaningful bits in the encoded stream
    pub encoded_bits: u64,

    /// Packed bytes (encoded bits rounded up to whole bytes)
    pub packed_bytes: u64,

    /// Characters in the decimal text form
    pub decimal_text_len: u64,

    /// Characters in the raw bit text form
    pub bit_text_len: u64,

    /// Bits per symbol, theoretical minimum
    pub entropy: f64,

    /// Bits per symbol, as coded
    pub average_code_length: f64,

    /// Whether the decoded output matched the source
    pub round_trip_ok: bool,
}

impl RunReport {
    /// `entropy / average_code_length`, in `[0, 1]` for a valid code.
    ///
    /// Returns 0.0 if nothing was coded.
    pub fn efficiency(&self) -> f64 {
        if self.average_code_length == 0.0 {
            0.0
        } else {
            self.entropy / self.average_code_length
        }
    }

    /// Compute compression ratio (packed / source).
    ///
    /// Returns 0.0 for an empty source.
    pub fn compression_ratio(&self) -> f64 {
        if self.source_len == 0 {
            0.0
        } else {
            self.packed_bytes as f64 / self.source_len as f64
        }
    }

    /// Export the report as `key=value` lines (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "source_len={}\n\
             encoded_bits={}\n\
             packed_bytes={}\n\
             decimal_text_len={}\n\
             bit_text_len={}\n\
             entropy={:.6}\n\
             average_code_length={:.6}\n\
             efficiency={:.4}\n\
             compression_ratio={:.4}\n\
             round_trip_ok={}\n",
            self.source_len,
            self.encoded_bits,
            self.packed_bytes,
            self.decimal_text_len,
            self.bit_text_len,
            self.entropy,
            self.average_code_length,
            self.efficiency(),
            self.compression_ratio(),
            self.round_trip_ok,
        )
    }
}
