//! Sample text generation.
//!
//! When no input file is specified, we generate a text over the configured
//! alphabet whose symbol mix resembles English prose, so the resulting code
//! has a visible spread of lengths.
//!
//! # Design
//!
//! Each alphabet symbol is drawn with a weight taken from approximate English
//! letter frequencies (per 10 000 characters). Symbols the table does not
//! know get weight 1. When the alphabet contains both CR and LF, a drawn CR
//! is always followed by LF, giving CRLF line breaks. ETX, if present, ends
//! the text.

use huffcode_core::{Alphabet, Symbol};
use rand::distributions::{Distribution, WeightedIndex};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// End-of-text control code.
const ETX: Symbol = 0x03;

/// Approximate occurrences per 10 000 characters of English text.
fn english_weight(symbol: Symbol) -> u32 {
    match symbol {
        b' ' => 1800,
        b'e' => 1030,
        b't' => 750,
        b'a' => 670,
        b'o' => 620,
        b'i' => 570,
        b'n' => 570,
        b's' => 530,
        b'h' => 500,
        b'r' => 490,
        b'd' => 350,
        b'l' => 330,
        b'u' => 230,
        b'c' => 230,
        b'm' => 200,
        b'w' => 190,
        b'f' => 180,
        b'g' => 160,
        b'y' => 160,
        b'p' => 150,
        b'b' => 120,
        b'v' => 80,
        b'k' => 60,
        b'j' => 10,
        b'x' => 10,
        b'q' => 8,
        b'z' => 6,
        b'\r' | b'\n' => 150,
        ETX => 0,
        _ => 1,
    }
}

/// Generate a sample text over `alphabet`.
///
/// # Arguments
/// - `seed`: random seed for determinism
/// - `size_bytes`: exact length of the generated text
/// - `alphabet`: the symbols to draw from
///
/// # Returns
/// Bytes drawn entirely from `alphabet`.
pub fn generate_sample_text(seed: u64, size_bytes: usize, alphabet: &Alphabet) -> Vec<u8> {
    let symbols = alphabet.symbols();
    let mut text = Vec::with_capacity(size_bytes);
    if symbols.is_empty() || size_bytes == 0 {
        return text;
    }

    let weights: Vec<u32> = symbols.iter().map(|&s| english_weight(s)).collect();
    let distribution = match WeightedIndex::new(&weights) {
        Ok(distribution) => distribution,
        // Only ETX (weight 0) in the alphabet
        Err(_) => return vec![symbols[0]; size_bytes],
    };

    let crlf = alphabet.contains(b'\r') && alphabet.contains(b'\n');
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    while text.len() < size_bytes {
        let symbol = symbols[distribution.sample(&mut rng)];
        text.push(symbol);
        if crlf && symbol == b'\r' {
            text.push(b'\n');
        }
    }
    text.truncate(size_bytes);

    if alphabet.contains(ETX) {
        if let Some(last) = text.last_mut() {
            *last = ETX;
        }
    }

    text
}
