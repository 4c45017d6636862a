//! Code assignment by tree traversal.
//!
//! Walking from the root, a left edge appends `0` and a right edge appends
//! `1`; each leaf's accumulated path is its code. Because codes live only on
//! leaves, no code can be a prefix of another.
//!
//! A tree that is a single leaf has an empty path. That leaf gets the code
//! `0` instead, so every symbol occupies at least one bit and the stream
//! stays decodable.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::alphabet::Symbol;
use crate::frequency::FrequencyModel;
use crate::tree::{HuffNode, HuffmanTree};

/// A bit-string, first emitted bit first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn clear(&mut self) {
        self.bits.clear();
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// True if `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }

    /// `self` followed by one more bit.
    fn extended(&self, bit: bool) -> Self {
        let mut bits = Vec::with_capacity(self.bits.len() + 1);
        bits.extend_from_slice(&self.bits);
        bits.push(bit);
        Self { bits }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = self.bits.iter().map(|&b| if b { '1' } else { '0' }).collect();
        f.pad(&text)
    }
}

impl FromStr for Code {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(format!("invalid bit {other:?} in code {s:?}")),
            })
            .collect::<Result<Vec<bool>, String>>()
            .map(|bits| Code { bits })
    }
}

/// Symbol to code mapping, with a reverse index for decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<Symbol, Code>,
    symbols: HashMap<Code, Symbol>,
    max_code_len: usize,
}

impl CodeTable {
    /// Derive codes straight from a tree.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();

        match tree.root() {
            HuffNode::Leaf { symbol, .. } => {
                codes.insert(*symbol, Code { bits: vec![false] });
            }
            root => walk(root, Code::new(), &mut codes),
        }

        Self::from_codes(codes)
    }

    pub(crate) fn from_codes(codes: BTreeMap<Symbol, Code>) -> Self {
        let max_code_len = codes.values().map(Code::len).max().unwrap_or(0);
        let symbols = codes.iter().map(|(&s, c)| (c.clone(), s)).collect();
        Self {
            codes,
            symbols,
            max_code_len,
        }
    }

    pub fn get(&self, symbol: Symbol) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    /// Exact reverse lookup.
    pub fn symbol_for(&self, code: &Code) -> Option<Symbol> {
        self.symbols.get(code).copied()
    }

    pub fn max_code_len(&self) -> usize {
        self.max_code_len
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Code)> {
        self.codes.iter().map(|(&s, c)| (s, c))
    }

    /// Check that no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        // In sorted order a prefix always sorts immediately before some
        // code it prefixes, so neighbours suffice.
        let mut sorted: Vec<&Code> = self.codes.values().collect();
        sorted.sort();
        sorted.windows(2).all(|pair| !pair[0].is_prefix_of(pair[1]))
    }
}

fn walk(node: &HuffNode, path: Code, codes: &mut BTreeMap<Symbol, Code>) {
    match node {
        HuffNode::Leaf { symbol, .. } => {
            codes.insert(*symbol, path);
        }
        HuffNode::Internal { left, right, .. } => {
            walk(left, path.extended(false), codes);
            walk(right, path.extended(true), codes);
        }
    }
}

/// Assign codes from `tree` to the symbols of `model`, in place.
///
/// Returns the same codes as a [`CodeTable`]. Model symbols that do not
/// appear in the tree keep `code: None`.
pub fn assign_codes(tree: &HuffmanTree, model: &mut FrequencyModel) -> CodeTable {
    let table = CodeTable::from_tree(tree);

    for stats in model.stats_mut() {
        stats.code = table.get(stats.symbol).cloned();
    }

    log::debug!(
        "assigned {} codes, longest {} bits",
        table.len(),
        table.max_code_len()
    );

    table
}
