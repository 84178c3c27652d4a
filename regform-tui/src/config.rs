//! Optional TOML configuration.

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use simplelog::LevelFilter;
use thiserror::Error;

/// Config error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Where to display validation errors for an input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorDisplay {
    /// Show error message below the input (default).
    #[default]
    Below,
    /// Show error message to the right of the input.
    Inline,
    /// Don't display the message; only the label turns the error color.
    None,
}

/// An RGB colour, written as `[r, g, b]` in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub primary: Rgb,
    pub muted: Rgb,
    pub accent: Rgb,
    pub success: Rgb,
    pub error: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Rgb(230, 230, 230),
            muted: Rgb(110, 105, 125),
            accent: Rgb(140, 110, 220),
            success: Rgb(100, 200, 120),
            error: Rgb(255, 100, 100),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: LogLevel,
    pub error_display: ErrorDisplay,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Debug,
            error_display: ErrorDisplay::default(),
            theme: Theme::default(),
        }
    }
}

impl Config {
    /// Read a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from the platform config dir, falling back to defaults on any error.
    ///
    /// Returns the error alongside so it can be logged once logging is up.
    pub fn load_or_default() -> (Self, Option<ConfigError>) {
        let Some(path) = crate::paths::config_file() else {
            return (Self::default(), None);
        };
        match Self::load(&path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse(
            r#"
            log_level = "warn"
            error_display = "inline"

            [theme]
            error = [200, 0, 0]
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.error_display, ErrorDisplay::Inline);
        assert_eq!(config.theme.error, Rgb(200, 0, 0));
        assert_eq!(config.theme.primary, Theme::default().primary);
    }

    #[test]
    fn test_bad_config_is_parse_error() {
        let err = Config::parse("error_display = \"sideways\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("regform-definitely-missing/config.toml");
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_level_filter_conversion() {
        assert_eq!(LevelFilter::from(LogLevel::Info), LevelFilter::Info);
        assert_eq!(LevelFilter::from(LogLevel::Off), LevelFilter::Off);
    }
}
