//! Symbol frequency aggregation.
//!
//! Counts how often each alphabet symbol occurs in a source and derives its
//! probability. Bytes outside the alphabet are not counted as symbols, but
//! they still contribute to the source length used as the denominator, so
//! the probabilities of a model need not sum to 1.
//!
//! # Ordering
//!
//! [`FrequencyModel::stats`] is sorted by decreasing probability. The sort is
//! stable, so symbols with equal counts keep their alphabet order. That order
//! is what the tree builder sees, and it decides which equal-weight node is
//! extracted first.

use rayon::prelude::*;

use crate::alphabet::{Alphabet, Symbol};
use crate::code::Code;

/// Per-symbol statistics for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolStats {
    pub symbol: Symbol,
    /// Exact number of occurrences in the source
    pub count: u64,
    /// `count / source length`
    pub probability: f64,
    /// Assigned once by the code assigner
    pub code: Option<Code>,
}

impl SymbolStats {
    /// Length of the assigned code, or 0 while unassigned.
    pub fn code_len(&self) -> usize {
        self.code.as_ref().map_or(0, Code::len)
    }
}

/// Raw occurrence counts in alphabet order.
///
/// Partial tallies over disjoint pieces of a source can be merged in any
/// order and grouping; the result is the tally of the whole source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolCounts {
    counts: Vec<u64>,
    total_len: u64,
}

impl SymbolCounts {
    /// Zeroed counts for `alphabet`.
    pub fn new(alphabet: &Alphabet) -> Self {
        Self {
            counts: vec![0; alphabet.len()],
            total_len: 0,
        }
    }

    /// Add the occurrences in `chunk` to this tally.
    pub fn tally(&mut self, alphabet: &Alphabet, chunk: &[u8]) {
        for &byte in chunk {
            if let Some(position) = alphabet.position(byte) {
                self.counts[position] += 1;
            }
        }
        self.total_len += chunk.len() as u64;
    }

    /// Fold another partial tally into this one.
    ///
    /// Both tallies must come from the same alphabet.
    pub fn merge(mut self, other: &SymbolCounts) -> Self {
        debug_assert_eq!(self.counts.len(), other.counts.len());
        for (mine, theirs) in self.counts.iter_mut().zip(&other.counts) {
            *mine += theirs;
        }
        self.total_len += other.total_len;
        self
    }

    /// Counts in alphabet order.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Bytes seen, including those outside the alphabet.
    pub fn total_len(&self) -> u64 {
        self.total_len
    }
}

/// Frequency statistics for every alphabet symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyModel {
    stats: Vec<SymbolStats>,
    total_len: u64,
}

impl FrequencyModel {
    /// Count every alphabet symbol in `source`.
    pub fn count(source: &[u8], alphabet: &Alphabet) -> Self {
        let mut counts = SymbolCounts::new(alphabet);
        counts.tally(alphabet, source);
        Self::from_counts(alphabet, &counts)
    }

    /// Count `source` in independent chunks on the rayon pool, then merge.
    ///
    /// Produces the same model as [`FrequencyModel::count`]. The chunk size
    /// bounds the work of one task, not the number of threads.
    pub fn count_chunked(source: &[u8], alphabet: &Alphabet, chunk_size: usize) -> Self {
        let chunk_size = chunk_size.max(1);

        let merged = source
            .par_chunks(chunk_size)
            .fold(
                || SymbolCounts::new(alphabet),
                |mut partial, chunk| {
                    partial.tally(alphabet, chunk);
                    partial
                },
            )
            .reduce(|| SymbolCounts::new(alphabet), |acc, partial| acc.merge(&partial));

        log::debug!(
            "counted {} bytes in {} chunks of up to {} bytes on {} threads",
            merged.total_len(),
            source.len().div_ceil(chunk_size),
            chunk_size,
            rayon::current_num_threads()
        );

        Self::from_counts(alphabet, &merged)
    }

    /// Build a model from a finished tally.
    pub fn from_counts(alphabet: &Alphabet, counts: &SymbolCounts) -> Self {
        let total_len = counts.total_len();

        let mut stats: Vec<SymbolStats> = alphabet
            .symbols()
            .iter()
            .zip(counts.counts())
            .map(|(&symbol, &count)| SymbolStats {
                symbol,
                count,
                probability: if total_len == 0 {
                    0.0
                } else {
                    count as f64 / total_len as f64
                },
                code: None,
            })
            .collect();

        // Stable: equal probabilities keep alphabet order
        stats.sort_by(|a, b| b.probability.total_cmp(&a.probability));

        Self { stats, total_len }
    }

    /// Stats in decreasing probability order.
    pub fn stats(&self) -> &[SymbolStats] {
        &self.stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut [SymbolStats] {
        &mut self.stats
    }

    /// Look up one symbol's stats.
    pub fn get(&self, symbol: Symbol) -> Option<&SymbolStats> {
        self.stats.iter().find(|s| s.symbol == symbol)
    }

    /// `(symbol, probability)` pairs in model order, ready for tree building.
    pub fn weights(&self) -> Vec<(Symbol, f64)> {
        self.stats.iter().map(|s| (s.symbol, s.probability)).collect()
    }

    /// Source length, including bytes outside the alphabet.
    pub fn total_len(&self) -> u64 {
        self.total_len
    }

    /// Number of source bytes that belong to the alphabet.
    pub fn counted_len(&self) -> u64 {
        self.stats.iter().map(|s| s.count).sum()
    }
}
