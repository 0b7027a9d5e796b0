use std::{fmt, fs, io, path::Path};

use serde::Deserialize;
use smooth::stream::StreamOptions;

pub const DEFAULT_WINDOW: usize = 8;

/// Settings read from the optional TOML config file. Command line flags win over these.
#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub window: Option<usize>,
    pub precision: Option<usize>,
    pub diagnostics: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Merges command line values over the file's, falling back to the defaults.
    pub fn resolve(
        &self,
        window: Option<usize>,
        precision: Option<usize>,
        diagnostics: bool,
    ) -> (usize, StreamOptions) {
        let window = window.or(self.window).unwrap_or(DEFAULT_WINDOW);
        let options = StreamOptions {
            precision: precision
                .or(self.precision)
                .unwrap_or(StreamOptions::default().precision),
            diagnostics: diagnostics || self.diagnostics,
        };
        (window, options)
    }
}
