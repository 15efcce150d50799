//! User-facing messages

pub mod human;

pub use human::{HumanReporter, USAGE, resolve_color};
