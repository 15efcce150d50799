#![forbid(unsafe_code)]

//! File rendering
//!
//! Reads each input file line by line and writes it to the sink, decorating
//! lines when a [`Decorator`] is attached. Inputs that can't be opened or
//! read are reported and skipped; a failing sink stops the render.

use super::decorate::{Decorator, incomplete_utf8_tail};
use rand::Rng;
use rand::rngs::StdRng;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors raised while rendering
#[derive(Debug, Error)]
pub enum RenderError {
    /// An input file could not be opened
    #[error("file '{}' couldn't be displayed: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An input file failed part way through reading
    #[error("file '{}' couldn't be displayed: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The sink rejected a write
    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),
}

impl RenderError {
    /// Returns true if rendering cannot continue after this error
    pub fn is_fatal(&self) -> bool {
        matches!(self, RenderError::Write(_))
    }
}

/// Summary of a completed render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Files written to the sink in full
    pub files_rendered: usize,
    /// Files skipped because they couldn't be opened or read
    pub files_failed: usize,
    /// Bytes read from input files
    pub bytes_read: u64,
    /// Decoration glyphs inserted
    pub glyphs_inserted: usize,
}

impl RenderReport {
    /// Returns true if every input was rendered
    pub fn is_clean(&self) -> bool {
        self.files_failed == 0
    }
}

/// Writes input files to a sink
///
/// `terminal` controls the trailing newline: terminal output gets one extra
/// `\n` after the last rendered file, redirected output gets none.
pub struct Renderer<W: Write, R: Rng = StdRng> {
    sink: W,
    terminal: bool,
    decorator: Option<Decorator<R>>,
    line_buffer: usize,
}

impl<W: Write> Renderer<W, StdRng> {
    /// Creates a plain renderer writing to `sink`
    pub fn new(sink: W, terminal: bool) -> Self {
        Renderer {
            sink,
            terminal,
            decorator: None,
            line_buffer: 0,
        }
    }
}

impl<W: Write, R: Rng> Renderer<W, R> {
    /// Decorate every line with `decorator`
    pub fn with_decorator<D: Rng>(self, decorator: Decorator<D>) -> Renderer<W, D> {
        Renderer {
            sink: self.sink,
            terminal: self.terminal,
            decorator: Some(decorator),
            line_buffer: self.line_buffer,
        }
    }

    /// Decorate every line with `decorator` when one is given
    pub fn with_optional_decorator(mut self, decorator: Option<Decorator<R>>) -> Self {
        self.decorator = decorator;
        self
    }

    /// Read lines in chunks of at most `bytes` bytes; 0 reads whole lines
    ///
    /// Long lines are split across reads but never lose data.
    pub fn with_line_buffer(mut self, bytes: usize) -> Self {
        self.line_buffer = bytes;
        self
    }

    /// Render every path in order
    ///
    /// Non-fatal errors are handed to `report` and rendering moves on to the
    /// next path. A write failure is returned immediately.
    pub fn render_all<P, F>(
        &mut self,
        paths: &[P],
        mut report: F,
    ) -> Result<RenderReport, RenderError>
    where
        P: AsRef<Path>,
        F: FnMut(&RenderError),
    {
        let mut summary = RenderReport::default();

        for path in paths {
            match self.render_file(path.as_ref(), &mut summary) {
                Ok(()) => summary.files_rendered += 1,
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    summary.files_failed += 1;
                    report(&err);
                }
            }
        }

        if self.terminal && summary.files_rendered > 0 {
            self.sink.write_all(b"\n").map_err(RenderError::Write)?;
        }
        self.sink.flush().map_err(RenderError::Write)?;

        debug!(
            rendered = summary.files_rendered,
            failed = summary.files_failed,
            bytes = summary.bytes_read,
            glyphs = summary.glyphs_inserted,
            "render finished"
        );
        Ok(summary)
    }

    /// Render a single file, closing it before returning
    fn render_file(
        &mut self,
        path: &Path,
        summary: &mut RenderReport,
    ) -> Result<(), RenderError> {
        let file = File::open(path).map_err(|source| RenderError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        trace!(path = %path.display(), "rendering file");

        let limit = match self.line_buffer {
            0 => u64::MAX,
            n => n as u64,
        };

        let mut reader = BufReader::new(file);
        let mut line = Vec::new();
        let mut carry = Vec::new();
        let mut decorated = Vec::new();

        loop {
            line.clear();
            line.append(&mut carry);
            let read = (&mut reader)
                .take(limit)
                .read_until(b'\n', &mut line)
                .map_err(|source| RenderError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
            summary.bytes_read += read as u64;
            if read == 0 {
                self.write_chunk(&line, &mut decorated, summary)?;
                break;
            }

            // A chunk cut mid-character keeps the partial sequence for the
            // next read so the decorator sees whole characters
            if self.decorator.is_some() && !line.ends_with(b"\n") {
                let keep = line.len() - incomplete_utf8_tail(&line);
                carry.extend_from_slice(&line[keep..]);
                line.truncate(keep);
            }
            self.write_chunk(&line, &mut decorated, summary)?;
        }

        Ok(())
    }

    fn write_chunk(
        &mut self,
        chunk: &[u8],
        decorated: &mut Vec<u8>,
        summary: &mut RenderReport,
    ) -> Result<(), RenderError> {
        if chunk.is_empty() {
            return Ok(());
        }

        let written = match self.decorator.as_mut() {
            Some(decorator) => {
                decorated.clear();
                summary.glyphs_inserted += decorator.decorate_into(chunk, decorated);
                self.sink.write_all(decorated)
            }
            None => self.sink.write_all(chunk),
        };
        written.map_err(RenderError::Write)
    }

    /// Consumes the renderer and returns the sink
    pub fn into_sink(self) -> W {
        self.sink
    }
}
