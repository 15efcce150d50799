//! Settings file parsing and validation

pub mod settings;

pub use settings::{ColorOption, ConfigError, DecorateConfig, Limits, OutputConfig, Settings};
