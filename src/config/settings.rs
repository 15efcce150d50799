#![forbid(unsafe_code)]

//! Parsing and validation of the optional `catify.toml` settings file
//!
//! Every section and key is optional; anything left out falls back to the
//! built-in defaults, which reproduce the classic behavior (255 files at most,
//! one cat in ten characters).

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Environment variable naming the settings file to load
pub const CONFIG_ENV: &str = "CATIFY_CONFIG";

/// Environment variable overriding the decoration seed
pub const SEED_ENV: &str = "CATIFY_SEED";

/// Default cap on the number of input files
pub const DEFAULT_MAX_FILES: usize = 255;

/// Default decoration glyph
pub const DEFAULT_GLYPH: char = '🐱';

/// Default decoration rate: one glyph per this many characters on average
pub const DEFAULT_RATE: u32 = 10;

/// Errors that can occur while loading settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid TOML or has unknown keys
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The glyph must be exactly one character
    #[error("decorate.glyph must be exactly one character, got '{0}'")]
    InvalidGlyph(String),

    /// The rate must be at least one
    #[error("decorate.rate must be at least 1")]
    InvalidRate,

    /// The seed override is not an unsigned integer
    #[error("CATIFY_SEED must be an unsigned integer, got '{0}'")]
    InvalidSeed(String),
}

/// Colour preference for error output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorOption {
    /// Colour only when stderr is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

/// Resource limits
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Limits {
    /// Maximum number of input paths; 0 means unlimited
    pub max_files: usize,
    /// Largest single read of a line, in bytes; 0 means whole lines
    pub line_buffer: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_files: DEFAULT_MAX_FILES,
            line_buffer: 0,
        }
    }
}

impl Limits {
    /// Returns the file cap, or `None` when unlimited
    pub fn file_cap(&self) -> Option<usize> {
        (self.max_files > 0).then_some(self.max_files)
    }
}

/// Decoration settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecorateConfig {
    pub glyph: String,
    pub rate: u32,
    /// Fixed seed; when absent the clock is used
    pub seed: Option<u64>,
}

impl Default for DecorateConfig {
    fn default() -> Self {
        DecorateConfig {
            glyph: DEFAULT_GLYPH.to_string(),
            rate: DEFAULT_RATE,
            seed: None,
        }
    }
}

impl DecorateConfig {
    /// Returns the glyph as a single character
    pub fn glyph_char(&self) -> char {
        self.glyph.chars().next().unwrap_or(DEFAULT_GLYPH)
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub color: ColorOption,
}

/// Complete settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub limits: Limits,
    pub decorate: DecorateConfig,
    pub output: OutputConfig,
}

impl Settings {
    /// Parse and validate settings from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), "loaded settings file");
        Self::parse(&content)
    }

    /// Resolve settings from the values of the environment variables
    ///
    /// `config_path` is the value of [`CONFIG_ENV`], `seed` the value of
    /// [`SEED_ENV`], and `no_color` whether `NO_COLOR` is set. Taking the
    /// values rather than reading the environment keeps this testable.
    pub fn resolve(
        config_path: Option<&str>,
        seed: Option<&str>,
        no_color: bool,
    ) -> Result<Self, ConfigError> {
        let mut settings = match config_path {
            Some(path) if !path.is_empty() => Self::load(Path::new(path))?,
            _ => Settings::default(),
        };

        if let Some(raw) = seed {
            let parsed = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidSeed(raw.to_string()))?;
            settings.decorate.seed = Some(parsed);
        }

        if no_color {
            settings.output.color = ColorOption::Never;
        }

        Ok(settings)
    }

    /// Resolve settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let config_path = std::env::var(CONFIG_ENV).ok();
        let seed = std::env::var(SEED_ENV).ok();
        let no_color = std::env::var_os("NO_COLOR").is_some();
        Self::resolve(config_path.as_deref(), seed.as_deref(), no_color)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.decorate.glyph.chars().count() != 1 {
            return Err(ConfigError::InvalidGlyph(self.decorate.glyph.clone()));
        }
        if self.decorate.rate == 0 {
            return Err(ConfigError::InvalidRate);
        }
        Ok(())
    }
}
