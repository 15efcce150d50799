#![forbid(unsafe_code)]

//! Option dispatch
//!
//! Interprets [`ArgumentRecord`]s against the recognized options and builds a
//! [`RenderPlan`]. Dispatch is side-effect free: the output file named by
//! `-o` is only opened by the caller once dispatch has succeeded, so a usage
//! error or `--help` never touches the filesystem.

use super::args::ArgumentRecord;
use crate::config::Limits;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Stripped name of `--help`
pub const OPTION_HELP: &str = "-help";

/// Stripped name of `-o`
pub const OPTION_OUTPUT: &str = "o";

/// Stripped name of `--catify`
pub const OPTION_CATIFY: &str = "-catify";

/// Fatal command line errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    /// An option name not in the recognized set; holds the stripped name
    #[error("unknown option '-{0}' entered")]
    UnknownOption(String),

    /// `-o` appeared without a following value
    #[error("no output file specified")]
    MissingOutputPath,

    /// More input paths than the configured cap
    #[error("file limit exceeded (maximum {0} files)")]
    TooManyFiles(usize),

    /// No input paths at all
    #[error("no file paths provided")]
    NoInputFiles,
}

/// Where rendered output goes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputTarget {
    /// Standard output
    #[default]
    Terminal,
    /// A file, created or truncated before rendering
    File(PathBuf),
}

/// Everything the renderer needs to know about one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    /// Input files in command line order, never empty
    pub input_paths: Vec<PathBuf>,
    pub output: OutputTarget,
    /// Whether to sprinkle decoration glyphs into the output
    pub decorate: bool,
}

/// Outcome of a successful dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// `--help` was given: print usage and do nothing else
    Help,
    /// Render the given plan
    Render(RenderPlan),
}

/// Interpret argument records, in order, against the recognized options
///
/// Processing stops at the first `--help` (returning [`Invocation::Help`]) or
/// the first usage error. Records after either are never looked at.
///
/// `--catify` and `--help` take no value. A token the parser attached to
/// either is dropped, so `catify --catify a.txt` has no input paths.
pub fn dispatch(records: &[ArgumentRecord], limits: &Limits) -> Result<Invocation, UsageError> {
    let mut input_paths: Vec<PathBuf> = Vec::new();
    let mut output = OutputTarget::Terminal;
    let mut decorate = false;

    for record in records {
        match record.option_name.as_deref() {
            None => {
                if let Some(path) = &record.value {
                    push_input(&mut input_paths, path, limits)?;
                }
            }
            Some(OPTION_HELP) => {
                debug!("help requested, ignoring remaining arguments");
                return Ok(Invocation::Help);
            }
            Some(OPTION_OUTPUT) => match &record.value {
                Some(path) => output = OutputTarget::File(PathBuf::from(path)),
                None => return Err(UsageError::MissingOutputPath),
            },
            Some(OPTION_CATIFY) => decorate = true,
            Some(unknown) => return Err(UsageError::UnknownOption(unknown.to_string())),
        }
    }

    if input_paths.is_empty() {
        return Err(UsageError::NoInputFiles);
    }

    debug!(
        files = input_paths.len(),
        decorate,
        redirected = output != OutputTarget::Terminal,
        "dispatched arguments"
    );

    Ok(Invocation::Render(RenderPlan {
        input_paths,
        output,
        decorate,
    }))
}

fn push_input(paths: &mut Vec<PathBuf>, path: &str, limits: &Limits) -> Result<(), UsageError> {
    if let Some(cap) = limits.file_cap()
        && paths.len() + 1 > cap
    {
        return Err(UsageError::TooManyFiles(cap));
    }
    paths.push(PathBuf::from(path));
    Ok(())
}
