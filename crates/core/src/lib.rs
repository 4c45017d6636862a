//! huffcode-core: frequency-driven Huffman coding over a configurable alphabet
//!
//! This library provides the core components of a Huffman coder that:
//! - Counts symbol frequencies in a source over a fixed alphabet
//! - Builds a minimum-weight binary tree and derives prefix-free codes
//! - Packs the encoded bits and decodes them back exactly
//! - Measures entropy and average code length
//!
//! # Architecture
//!
//! Data flows strictly forward through these modules:
//! - `alphabet`: The closed symbol set of a run
//! - `frequency`: Occurrence counts and probabilities
//! - `tree`: Huffman tree construction
//! - `code`: Code assignment by tree traversal
//! - `bitio`: MSB-first bit packing with an exact bit length
//! - `codec`: Encode and decode against a code table
//! - `framing`: The decimal text artifact with length and CRC
//! - `metrics`: Entropy, average code length, run report
//! - `pipeline`: One complete encode/decode/verify run
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and recoverable
//! - **Deterministic**: Tie-breaks follow input order, so codes are reproducible
//! - **Exact**: Streams carry their bit length; padding is never decoded

pub mod alphabet;
pub mod bitio;
pub mod code;
pub mod codec;
pub mod error;
pub mod framing;
pub mod frequency;
pub mod metrics;
pub mod pipeline;
pub mod tree;

// Re-export commonly used types
pub use alphabet::{Alphabet, Symbol};
pub use bitio::EncodedStream;
pub use code::{assign_codes, Code, CodeTable};
pub use codec::{decode, encode, UnknownSymbolPolicy};
pub use error::{Error, Result};
pub use frequency::{FrequencyModel, SymbolStats};
pub use pipeline::{run, Run};
pub use tree::HuffmanTree;
