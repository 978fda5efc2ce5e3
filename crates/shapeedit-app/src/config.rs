//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "SHAPEEDIT_CONFIG";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Surface and shell settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Surface background color.
    pub background_color: String,
    /// Prompt printed before each command.
    pub prompt: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "shapeedit".to_string(),
            width: 800,
            height: 600,
            background_color: "#f8f9fa".to_string(),
            prompt: "> ".to_string(),
        }
    }
}

impl AppConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Resolve the config from an explicit path, then `SHAPEEDIT_CONFIG`,
    /// falling back to the defaults.
    pub fn resolve(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        match path {
            Some(path) => {
                log::info!("Loading config from {:?}", path);
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 600);
        assert_eq!(config.background_color, "#f8f9fa");
    }

    #[test]
    fn test_partial_json() {
        let config = AppConfig::from_json(r#"{ "width": 1024, "prompt": "$ " }"#).unwrap();
        assert_eq!(config.width, 1024);
        assert_eq!(config.prompt, "$ ");
        assert_eq!(config.height, 600);
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r##"{{ "title": "board", "background_color": "#ffffff" }}"##).unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.title, "board");
        assert_eq!(config.background_color, "#ffffff");
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(AppConfig::load(&missing), Err(ConfigError::Io { .. })));

        assert!(matches!(AppConfig::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_resolve_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "height": 300 }}"#).unwrap();
        let config = AppConfig::resolve(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.height, 300);
    }
}
