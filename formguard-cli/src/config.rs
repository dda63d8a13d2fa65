//! User configuration file.

use std::path::Path;

use formguard::NumericPolicy;
use log::LevelFilter;
use serde::Deserialize;

use crate::error::CliError;

/// Log verbosity as written in the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
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

/// Settings read from `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Config {
    pub log_level: LogLevel,
    /// Policy for fields whose schema does not set one.
    pub numeric_policy: NumericPolicy,
}

impl Config {
    /// Load the config file, or defaults if there is none.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| CliError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load(Some(Path::new("/definitely/not/here.json"))).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }

    #[test]
    fn test_parse() {
        let config: Config =
            serde_json::from_str(r#"{"logLevel": "debug", "numericPolicy": "strict"}"#).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.numeric_policy, NumericPolicy::Strict);
        assert_eq!(LevelFilter::from(config.log_level), LevelFilter::Debug);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"logLevel": "off"}"#).unwrap();
        assert_eq!(config.numeric_policy, NumericPolicy::Lenient);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(serde_json::from_str::<Config>(r#"{"verbose": true}"#).is_err());
    }
}
