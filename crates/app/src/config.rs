//! Configuration for the huffcode application.
//!
//! Handles parsing command-line arguments and filling in defaults.
//!
//! # Philosophy
//!
//! The tool should work with ZERO arguments: without `--in` it generates a
//! seeded sample text, and every default is printable with `--print-config`
//! so a run can be reproduced.

use huffcode_core::{Alphabet, UnknownSymbolPolicy};
use std::path::PathBuf;

/// Default size of the generated sample text.
const DEFAULT_SAMPLE_BYTES: usize = 4096;

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    // === Files ===
    /// Input file path (None = generate sample)
    pub input_file: Option<PathBuf>,

    /// Directory the artifacts are written to
    pub out_dir: PathBuf,

    // === Coding ===
    /// Symbols the code is built over
    pub alphabet: Alphabet,

    /// The `--alphabet` argument as given (None = reference alphabet)
    pub alphabet_spec: Option<String>,

    /// Handling of source bytes outside the alphabet
    pub policy: UnknownSymbolPolicy,

    // === Sample generation ===
    /// Seed for the sample generator
    pub seed: u64,

    /// Size of the generated sample in bytes
    pub sample_bytes: usize,

    // === Behavior ===
    /// Whether to print the resolved configuration
    pub print_config: bool,

    /// Whether to print the symbol table
    pub print_table: bool,

    /// Debug-level logging
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command-line arguments (program name excluded).
    ///
    /// If `--seed` is not provided, a time-based seed is used for sample
    /// generation; it is printed with `--print-config`.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut input_file: Option<PathBuf> = None;
        let mut out_dir: Option<PathBuf> = None;
        let mut alphabet_spec: Option<String> = None;
        let mut policy = UnknownSymbolPolicy::Strict;
        let mut seed: Option<u64> = None;
        let mut sample_bytes: Option<usize> = None;
        let mut print_config = false;
        let mut print_table = true;
        let mut verbose = false;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--in" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--in requires a path".to_string());
                    }
                    input_file = Some(PathBuf::from(&args[i]));
                }
                "--out-dir" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--out-dir requires a path".to_string());
                    }
                    out_dir = Some(PathBuf::from(&args[i]));
                }
                "--alphabet" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--alphabet requires a symbol spec".to_string());
                    }
                    alphabet_spec = Some(args[i].clone());
                }
                "--skip-unknown" => {
                    policy = UnknownSymbolPolicy::Skip;
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--sample-bytes" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--sample-bytes requires a number".to_string());
                    }
                    sample_bytes = Some(args[i].parse().map_err(|_| "invalid sample-bytes")?);
                }
                "--print-config" => {
                    print_config = true;
                }
                "--no-table" => {
                    print_table = false;
                }
                "--verbose" | "-v" => {
                    verbose = true;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                _ => {
                    return Err(format!("unknown argument: {}", args[i]));
                }
            }
            i += 1;
        }

        let alphabet = match &alphabet_spec {
            Some(spec) => Alphabet::parse(spec).map_err(|e| e.to_string())?,
            None => Alphabet::reference(),
        };
        if alphabet.is_empty() {
            return Err("alphabet must contain at least one symbol".to_string());
        }

        // Determine seed (explicit or time-based)
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

        Ok(Config {
            input_file,
            out_dir: out_dir.unwrap_or_else(|| PathBuf::from(".")),
            alphabet,
            alphabet_spec,
            policy,
            seed,
            sample_bytes: sample_bytes.unwrap_or(DEFAULT_SAMPLE_BYTES),
            print_config,
            print_table,
            verbose,
        })
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        match &self.input_file {
            Some(path) => println!("Input file:  {}", path.display()),
            None => println!("Input file:  (generate {} byte sample)", self.sample_bytes),
        }
        println!("Output dir:  {}", self.out_dir.display());
        println!();
        println!(
            "Alphabet: {} ({} symbols)",
            self.alphabet_spec.as_deref().unwrap_or("reference"),
            self.alphabet.len()
        );
        println!(
            "Unknown symbols: {}",
            match self.policy {
                UnknownSymbolPolicy::Strict => "fail",
                UnknownSymbolPolicy::Skip => "skip",
            }
        );
        println!("Seed: {}", self.seed);
        println!();
    }
}

fn print_help() {
    println!("huffcode: Huffman code construction, encoding and round-trip verification");
    println!();
    println!("USAGE:");
    println!("    huffcode [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --in <PATH>             Source text (default: generate sample)");
    println!("    --out-dir <DIR>         Where to write the encoded files (default: .)");
    println!();
    println!("    --alphabet <SPEC>       Symbols to code, e.g. 'a-z\\s' (default: ETX LF CR SP a-z)");
    println!("    --skip-unknown          Drop bytes outside the alphabet instead of failing");
    println!();
    println!("    --seed <N>              Seed for the generated sample");
    println!("    --sample-bytes <N>      Size of the generated sample (default: {DEFAULT_SAMPLE_BYTES})");
    println!();
    println!("    --print-config          Print resolved configuration");
    println!("    --no-table              Don't print the symbol table");
    println!("    --verbose, -v           Debug logging on stderr");
    println!("    --help, -h              Print this help");
    println!();
    println!("ALPHABET SPEC:");
    println!("    Literal characters and ranges (a-z); escapes \\n \\r \\t \\s \\\\ \\- \\xHH");
    println!();
    println!("EXAMPLES:");
    println!("    huffcode                                   # Code a random sample");
    println!("    huffcode --seed 42                         # Deterministic sample");
    println!("    huffcode --in grail.txt --skip-unknown     # Code a real file, ignoring capitals");
    println!("    huffcode --in dna.txt --alphabet acgt      # Custom alphabet");
    println!();
}
