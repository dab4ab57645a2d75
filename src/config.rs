//! User configuration loaded from a TOML file.
//!
//! Configuration only changes presentation. The evaluator whitelist is fixed
//! at compile time and cannot be extended here.

use crate::calculator::NumberFormat;
use crate::session::Mode;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Mode the interactive session starts in.
    pub default_mode: Mode,
    pub display: DisplayConfig,
}

/// How results are shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Group integer digits: `1,000,000`.
    pub thousands_separators: bool,
    /// Show `0b`/`0x` prefixes on converted numbers.
    pub radix_prefixes: bool,
    /// Fractional digits kept before trailing zeros are trimmed.
    pub max_decimals: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            thousands_separators: true,
            radix_prefixes: true,
            max_decimals: 10,
        }
    }
}

impl DisplayConfig {
    pub fn number_format(&self) -> NumberFormat {
        NumberFormat {
            thousands_separators: self.thousands_separators,
            max_decimals: self.max_decimals.min(17),
        }
    }
}

impl Config {
    /// `$XDG_CONFIG_HOME/multicalc/config.toml` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("multicalc").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the default path is used
    /// when present and built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => {
                    tracing::debug!("no config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_file() {
        let config = Config::from_toml(
            r#"
            default_mode = "programmer"

            [display]
            radix_prefixes = false
            "#,
        )
        .unwrap();
        assert_eq!(config.default_mode, Mode::Programmer);
        assert!(!config.display.radix_prefixes);
        assert!(config.display.thousands_separators);
        assert_eq!(config.display.max_decimals, 10);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(Config::from_toml("functions = [\"system\"]").is_err());
        assert!(Config::from_toml("default_mode = \"root\"").is_err());
    }

    #[test]
    fn test_missing_explicit_path_fails() {
        let err = Config::load(Some(Path::new("/nonexistent/multicalc.toml"))).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read config file"));
    }

    #[test]
    fn test_number_format() {
        let display = DisplayConfig {
            thousands_separators: false,
            radix_prefixes: true,
            max_decimals: 40,
        };
        let format = display.number_format();
        assert!(!format.thousands_separators);
        assert_eq!(format.max_decimals, 17);
    }
}
