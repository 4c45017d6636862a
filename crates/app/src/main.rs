//! huffcode: build a Huffman code for a text, write the encoded artifacts,
//! read them back and check the decoded text against the source.

mod config;
mod input_gen;
mod logger;
mod output;
mod report;

use config::Config;
use huffcode_core::pipeline::verify;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("run with --help for usage");
            return ExitCode::FAILURE;
        }
    };

    logger::init(config.verbose);

    match execute(&config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Run the coder once. Returns whether the decoded text matched the source.
fn execute(config: &Config) -> huffcode_core::Result<bool> {
    if config.print_config {
        config.print();
    }

    let source = match &config.input_file {
        Some(path) => std::fs::read(path)?,
        None => {
            log::info!(
                "generating {} byte sample (seed {})",
                config.sample_bytes,
                config.seed
            );
            input_gen::generate_sample_text(config.seed, config.sample_bytes, &config.alphabet)
        }
    };

    let run = huffcode_core::run(&source, &config.alphabet, config.policy)?;

    if config.print_table {
        print!("{}", report::format_table(run.model.stats()));
    }

    // Decode what actually landed on disk, not the in-memory stream
    let paths = output::write_artifacts(&config.out_dir, &run)?;
    let stream = output::read_decimal_artifact(&paths.decimal)?;
    let decoded = huffcode_core::decode(&stream, &run.table)?;
    let disk_ok = match verify(&run.decoded, &decoded) {
        Ok(()) => true,
        Err(e) => {
            log::error!("{} decodes differently: {e}", paths.decimal.display());
            false
        }
    };
    let round_trip_ok = run.report.round_trip_ok && disk_ok;

    print!("{}", report::format_summary(&run.report));
    println!();
    println!("{}", report::verdict(round_trip_ok));
    Ok(round_trip_ok)
}
