//! Application configuration module
//!
//! Configuration for the messaging client: the API base URL, loadable from a
//! TOML file in the platform config directory with an environment override.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Environment variable overriding the configured server URL
pub const SERVER_URL_ENV: &str = "MINDWELL_API_URL";

/// Config file location relative to the platform config directory
const CONFIG_FILE_RELATIVE: &str = "mindwell/messaging.toml";

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Messaging API base URL
    pub server_url: Option<String>,
}

/// On-disk representation of the config file
#[derive(Debug, Deserialize)]
struct FileConfig {
    server_url: Option<String>,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from a TOML file.
    ///
    /// A missing file is not an error: the defaults apply.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        let file: FileConfig = toml::from_str(&raw)
            .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))?;
        let config = Self {
            server_url: file.server_url,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load from the default platform location, e.g.
    /// `~/.config/mindwell/messaging.toml` on Linux.
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::from_toml_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Default config file path for this platform, if one can be determined
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_FILE_RELATIVE))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.server_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidUrl(url.clone()));
            }
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    server_url: Option<String>,
}

impl AppConfigBuilder {
    /// Set the server URL
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            server_url: self.server_url,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("cannot read config file: {0}")]
    Io(String),
    #[error("cannot parse config file: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builder_validates_url_scheme() {
        let result = AppConfig::builder().server_url("ftp://example.org").build();
        assert!(matches!(result, Err(ConfigError::InvalidUrl(_))));

        let config = AppConfig::builder()
            .server_url("https://api.example.org")
            .build()
            .unwrap();
        assert_eq!(config.server_url.as_deref(), Some("https://api.example.org"));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = AppConfig::from_toml_file(Path::new("/nonexistent/messaging.toml")).unwrap();
        assert!(config.server_url.is_none());
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server_url = \"https://api.mindwell.example\"").unwrap();
        let config = AppConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(
            config.server_url.as_deref(),
            Some("https://api.mindwell.example")
        );
    }

    #[test]
    fn test_bad_toml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server_url = [not toml").unwrap();
        let result = AppConfig::from_toml_file(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
