#![forbid(unsafe_code)]

//! Output sinks

use crate::cli::OutputTarget;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// The output file could not be created
#[derive(Debug, Error)]
#[error("couldn't open/create output file '{}': {source}", .path.display())]
pub struct SinkError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Destination for rendered output
pub enum Sink {
    /// Standard output
    Terminal(io::Stdout),
    /// A redirected output file
    File(BufWriter<File>),
    /// Redirection was requested but the file couldn't be opened; output is dropped
    Discard(io::Sink),
}

impl Sink {
    /// Opens the sink for an output target, creating or truncating files
    pub fn open(target: &OutputTarget) -> Result<Self, SinkError> {
        match target {
            OutputTarget::Terminal => Ok(Sink::Terminal(io::stdout())),
            OutputTarget::File(path) => Self::create(path),
        }
    }

    fn create(path: &Path) -> Result<Self, SinkError> {
        let file = File::create(path).map_err(|source| SinkError {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "opened output file");
        Ok(Sink::File(BufWriter::new(file)))
    }

    /// A sink standing in for an output file that couldn't be opened
    pub fn discard() -> Self {
        Sink::Discard(io::sink())
    }

    /// Returns true when writing to the terminal rather than a redirected target
    pub fn is_terminal(&self) -> bool {
        matches!(self, Sink::Terminal(_))
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Terminal(out) => out.write(buf),
            Sink::File(out) => out.write(buf),
            Sink::Discard(out) => out.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Sink::Terminal(out) => out.write_all(buf),
            Sink::File(out) => out.write_all(buf),
            Sink::Discard(out) => out.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Terminal(out) => out.flush(),
            Sink::File(out) => out.flush(),
            Sink::Discard(out) => out.flush(),
        }
    }
}
