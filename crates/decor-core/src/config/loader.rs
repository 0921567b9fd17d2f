//! Configuration file discovery and loading

use std::fs;
use std::path::{Path, PathBuf};

use super::options::DecorConfig;
use crate::error::DecorError;
use crate::result::Result;

/// File names searched by [`ConfigLoader::auto_discover`], in priority order
pub const CONFIG_FILE_NAMES: &[&str] = &["decor.toml", ".decor.json"];

/// Configuration loader for discovering and loading config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Search `start_path` and its ancestors for a configuration file
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = start_path
            .canonicalize()
            .map_err(|e| DecorError::config_error(format!("Invalid path: {e}")))?;

        loop {
            for filename in CONFIG_FILE_NAMES {
                let config_path = current.join(filename);
                if config_path.is_file() {
                    tracing::debug!("Found config: {}", config_path.display());
                    return Ok(Some(config_path));
                }
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }

        Ok(None)
    }

    /// Load configuration from a `.toml` or `.json` file
    pub fn load_from_file(path: &Path) -> Result<DecorConfig> {
        let content = fs::read_to_string(path).map_err(|e| DecorError::io_error(path, e))?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(DecorError::config_error(format!(
                "Unsupported config format: {}",
                path.display()
            ))),
        };
        config.map_err(|e| {
            DecorError::config_error(format!(
                "Failed to load config from '{}': {}",
                path.display(),
                e
            ))
        })
    }

    pub fn from_toml_str(content: &str) -> Result<DecorConfig> {
        toml::from_str(content).map_err(|e| DecorError::config_error(e.to_string()))
    }

    pub fn from_json_str(content: &str) -> Result<DecorConfig> {
        serde_json::from_str(content).map_err(|e| DecorError::config_error(e.to_string()))
    }

    /// Load config from an explicit path, or auto-discover one
    ///
    /// Without an explicit path and without a discovered file the defaults
    /// are returned.
    pub fn load(custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<DecorConfig> {
        if let Some(path) = custom_path {
            if !path.exists() {
                return Err(DecorError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_from_file(path);
        }

        let search_dir = start_dir.unwrap_or_else(|| Path::new("."));
        match Self::auto_discover(search_dir)? {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(DecorConfig::default())
            }
        }
    }
}
