//! Closed symbol sets.
//!
//! An [`Alphabet`] is the ordered list of symbols a run is allowed to code.
//! Membership is fixed at construction; the order is the tie-break order
//! used by frequency sorting.
//!
//! # Alphabet Syntax
//!
//! [`Alphabet::parse`] accepts a compact configuration string:
//!
//! ```text
//! \x03\n\r\sa-z      the reference alphabet
//! 01                 a binary alphabet
//! a-f\t              six letters and a tab
//! ```
//!
//! Escapes: `\n`, `\r`, `\t`, `\s` (space), `\\`, `\-`, `\xHH`. A `-` between
//! two symbols denotes an inclusive range.

use crate::error::{Error, Result};

/// A single alphabet member.
pub type Symbol = u8;

/// Ordered, duplicate-free set of symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<Symbol>,
    /// Membership index: `index[b]` is the position of `b` in `symbols`
    index: [Option<u16>; 256],
}

impl Alphabet {
    /// Build an alphabet from an ordered list of symbols.
    ///
    /// # Errors
    /// `Error::DuplicateSymbol` if a symbol appears more than once.
    pub fn new(symbols: impl IntoIterator<Item = Symbol>) -> Result<Self> {
        let mut index = [None; 256];
        let mut ordered = Vec::new();

        for symbol in symbols {
            let slot = &mut index[symbol as usize];
            if slot.is_some() {
                return Err(Error::DuplicateSymbol(symbol));
            }
            *slot = Some(ordered.len() as u16);
            ordered.push(symbol);
        }

        Ok(Self {
            symbols: ordered,
            index,
        })
    }

    /// The reference alphabet: ETX, LF, CR, space, then `a` through `z`.
    pub fn reference() -> Self {
        let symbols: Vec<Symbol> = [0x03, b'\n', b'\r', b' ']
            .into_iter()
            .chain(b'a'..=b'z')
            .collect();

        let mut index = [None; 256];
        for (position, &symbol) in symbols.iter().enumerate() {
            index[symbol as usize] = Some(position as u16);
        }

        Self { symbols, index }
    }

    /// Parse an alphabet from its configuration syntax (see module docs).
    pub fn parse(spec: &str) -> Result<Self> {
        let atoms = lex(spec)?;
        let mut symbols = Vec::new();

        let mut i = 0;
        while i < atoms.len() {
            match atoms[i] {
                Atom::Symbol(low) => {
                    if matches!(atoms.get(i + 1), Some(Atom::RangeDash)) {
                        let high = match atoms.get(i + 2) {
                            Some(Atom::Symbol(high)) => *high,
                            _ => {
                                return Err(Error::InvalidAlphabet(format!(
                                    "range starting at {:?} has no upper bound",
                                    low as char
                                )))
                            }
                        };
                        if high < low {
                            return Err(Error::InvalidAlphabet(format!(
                                "descending range {:?}-{:?}",
                                low as char, high as char
                            )));
                        }
                        symbols.extend(low..=high);
                        i += 3;
                    } else {
                        symbols.push(low);
                        i += 1;
                    }
                }
                Atom::RangeDash => {
                    return Err(Error::InvalidAlphabet(
                        "range dash without a lower bound".to_string(),
                    ));
                }
            }
        }

        Self::new(symbols)
    }

    /// Symbols in alphabet order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Position of `symbol` in alphabet order, if it is a member.
    pub fn position(&self, symbol: Symbol) -> Option<usize> {
        self.index[symbol as usize].map(usize::from)
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.index[symbol as usize].is_some()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::reference()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Atom {
    Symbol(Symbol),
    RangeDash,
}

fn lex(spec: &str) -> Result<Vec<Atom>> {
    let bytes = spec.as_bytes();
    let mut atoms = Vec::with_capacity(bytes.len());

    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                let escaped = *bytes.get(i + 1).ok_or_else(|| {
                    Error::InvalidAlphabet("dangling escape at end of spec".to_string())
                })?;
                let symbol = match escaped {
                    b'n' => b'\n',
                    b'r' => b'\r',
                    b't' => b'\t',
                    b's' => b' ',
                    b'\\' => b'\\',
                    b'-' => b'-',
                    b'x' => {
                        let hex = spec.get(i + 2..i + 4).ok_or_else(|| {
                            Error::InvalidAlphabet("\\x needs two hex digits".to_string())
                        })?;
                        let value = u8::from_str_radix(hex, 16).map_err(|_| {
                            Error::InvalidAlphabet(format!("invalid hex escape \\x{hex}"))
                        })?;
                        atoms.push(Atom::Symbol(value));
                        i += 4;
                        continue;
                    }
                    other => {
                        return Err(Error::InvalidAlphabet(format!(
                            "unknown escape \\{}",
                            other as char
                        )))
                    }
                };
                atoms.push(Atom::Symbol(symbol));
                i += 2;
            }
            // A dash is a range operator only between two symbols
            b'-' if i > 0 && i + 1 < bytes.len() => {
                atoms.push(Atom::RangeDash);
                i += 1;
            }
            byte => {
                atoms.push(Atom::Symbol(byte));
                i += 1;
            }
        }
    }

    Ok(atoms)
}
