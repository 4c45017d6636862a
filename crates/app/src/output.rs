//! Artifact files.
//!
//! A run writes two text files into the output directory:
//! - `Huffman_Encoded.txt`: the framed decimal artifact, which is what gets
//!   read back and decoded
//! - `Huffman_Encoded_Bin.txt`: the same bits as space-separated 8-bit groups

use huffcode_core::framing::parse_decimal;
use huffcode_core::{EncodedStream, Run};
use std::fs;
use std::path::{Path, PathBuf};

pub const DECIMAL_FILE: &str = "Huffman_Encoded.txt";
pub const BINARY_FILE: &str = "Huffman_Encoded_Bin.txt";

/// Paths of the written artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub decimal: PathBuf,
    pub binary: PathBuf,
}

/// Write both artifacts of `run` into `out_dir`, creating it if needed.
pub fn write_artifacts(out_dir: &Path, run: &Run) -> std::io::Result<ArtifactPaths> {
    fs::create_dir_all(out_dir)?;

    let paths = ArtifactPaths {
        decimal: out_dir.join(DECIMAL_FILE),
        binary: out_dir.join(BINARY_FILE),
    };
    fs::write(&paths.decimal, &run.decimal_artifact)?;
    fs::write(&paths.binary, &run.bit_artifact)?;

    log::debug!(
        "wrote {} and {}",
        paths.decimal.display(),
        paths.binary.display()
    );
    Ok(paths)
}

/// Read a framed decimal artifact back from disk.
pub fn read_decimal_artifact(path: &Path) -> huffcode_core::Result<EncodedStream> {
    let text = fs::read_to_string(path)?;
    parse_decimal(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use huffcode_core::{Alphabet, Error, UnknownSymbolPolicy};

    fn sample_run() -> Run {
        huffcode_core::run(
            b"what is your quest\r\n",
            &Alphabet::reference(),
            UnknownSymbolPolicy::Strict,
        )
        .unwrap()
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let run = sample_run();

        let paths = write_artifacts(dir.path(), &run).unwrap();
        assert_eq!(paths.decimal, dir.path().join(DECIMAL_FILE));

        let stream = read_decimal_artifact(&paths.decimal).unwrap();
        assert_eq!(stream, run.stream);
        assert_eq!(fs::read_to_string(&paths.binary).unwrap(), run.bit_artifact);
    }

    #[test]
    fn test_creates_missing_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        let paths = write_artifacts(&nested, &sample_run()).unwrap();
        assert!(paths.decimal.exists());
        assert!(paths.binary.exists());
    }

    #[test]
    fn test_missing_artifact_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_decimal_artifact(&dir.path().join(DECIMAL_FILE));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
