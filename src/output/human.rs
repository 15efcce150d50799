#![forbid(unsafe_code)]

//! Human-readable messages: usage text and colourized error lines

use crate::config::ColorOption;
use std::io::{self, IsTerminal, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Prefix of every error line
pub const ERROR_PREFIX: &str = "ERROR:";

/// Usage text printed for `--help`
pub const USAGE: &str = "\
Concatenate and display given files. File paths are given as command
arguments, in the order they should be displayed.

Usage:
  catify <input-file1> [<input-file2> ...] [-o <output-file>] [--catify] [--help]

Options:
  -o <output-file>  Write the output to <output-file> instead of the terminal
  --catify          Sprinkle cats through the output
  --help            Show this message and exit

Environment:
  CATIFY_CONFIG     Path to a TOML settings file
  CATIFY_SEED       Fixed seed for --catify
  CATIFY_LOG        Log filter (e.g. debug)
  NO_COLOR          Disable coloured error messages
";

/// Pick the termcolor choice for stderr
///
/// `Auto` only colours when stderr is a terminal; termcolor's own `Auto`
/// does not check that.
pub fn resolve_color(option: ColorOption) -> ColorChoice {
    match option {
        ColorOption::Always => ColorChoice::Always,
        ColorOption::Never => ColorChoice::Never,
        ColorOption::Auto if io::stderr().is_terminal() => ColorChoice::Auto,
        ColorOption::Auto => ColorChoice::Never,
    }
}

/// Reports errors and usage to the user
pub struct HumanReporter {
    color_choice: ColorChoice,
}

impl HumanReporter {
    /// Creates a new HumanReporter with the specified color choice
    pub fn new(color_choice: ColorChoice) -> Self {
        HumanReporter { color_choice }
    }

    /// Write an error line to stderr, in red when colour is enabled
    pub fn write_error(&self, message: &str) -> io::Result<()> {
        let mut stderr = StandardStream::stderr(self.color_choice);
        Self::write_error_to(&mut stderr, message)
    }

    /// Write an error line to any colour-capable writer
    pub fn write_error_to<W: WriteColor>(out: &mut W, message: &str) -> io::Result<()> {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
        write!(out, "{} {}", ERROR_PREFIX, message)?;
        out.reset()?;
        writeln!(out)?;
        Ok(())
    }

    /// Report an error, ignoring failures to write it
    pub fn error(&self, message: impl AsRef<str>) {
        let _ = self.write_error(message.as_ref());
    }

    /// Write the usage text to stdout
    pub fn write_usage(&self) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(USAGE.as_bytes())?;
        stdout.flush()
    }
}
