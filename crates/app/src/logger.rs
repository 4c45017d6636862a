//! Minimal stderr backend for the `log` facade.

use log::{Level, LevelFilter, Log, Metadata, Record};

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", format_record(record.level(), record.target(), record.args()));
        }
    }

    fn flush(&self) {}
}

fn format_record(level: Level, target: &str, message: &std::fmt::Arguments) -> String {
    format!("[{level}] {target}: {message}")
}

/// Level used for a run: `Debug` with `--verbose`, `Info` otherwise.
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the stderr logger. Calling it twice keeps the first logger but
/// still updates the level.
pub fn init(verbose: bool) {
    // A second set_logger only fails because a logger is already installed
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level_for(verbose));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(false), LevelFilter::Info);
        assert_eq!(level_for(true), LevelFilter::Debug);
    }

    #[test]
    fn test_format_record() {
        let line = format_record(Level::Warn, "huffcode_core::codec", &format_args!("skipped {} bytes", 3));
        assert_eq!(line, "[WARN] huffcode_core::codec: skipped 3 bytes");
    }
}
