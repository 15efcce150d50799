//! Command line parsing, option dispatch and the top-level run loop

pub mod args;
pub mod dispatch;
pub mod run;

// Re-export types for convenient access
pub use args::{ArgumentRecord, parse_arguments};
pub use dispatch::{Invocation, OutputTarget, RenderPlan, UsageError, dispatch};
pub use run::{EXIT_FAILURE, EXIT_SUCCESS, EXIT_USAGE, run};
