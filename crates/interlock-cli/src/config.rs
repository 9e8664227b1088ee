//! CLI configuration loaded from `.interlock/config.json`.
//!
//! Configuration is optional. The project directory is checked first, then
//! the user config directory, then built-in defaults apply. Flags on the
//! command line always win over either file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const CONFIG_DIR: &str = ".interlock";
pub const CONFIG_FILE: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Query defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hops searched by `degrees` and `edges`.
    pub depth: usize,

    /// Maximum interlocks shown.
    pub limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            depth: 2,
            limit: 20,
        }
    }
}

impl Config {
    /// Loads the configuration that applies to `dir`.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let mut candidates = vec![dir.join(CONFIG_DIR).join(CONFIG_FILE)];
        if let Some(user_dir) = dirs::config_dir() {
            candidates.push(user_dir.join("interlock").join(CONFIG_FILE));
        }
        Self::load_first(&candidates)
    }

    /// Reads the first of `candidates` that exists, or returns defaults.
    pub fn load_first(candidates: &[PathBuf]) -> Result<Self, ConfigError> {
        match candidates.iter().find(|path| path.is_file()) {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_when_nothing_exists() {
        let dir = tempdir().unwrap();
        let config = Config::load_first(&[dir.path().join("missing.json")]).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_first_existing_file_wins() {
        let dir = tempdir().unwrap();
        let project = dir.path().join("project.json");
        let user = dir.path().join("user.json");
        fs::write(&user, r#"{"depth": 4, "limit": 5}"#).unwrap();

        let config = Config::load_first(&[project.clone(), user.clone()]).unwrap();
        assert_eq!(config, Config { depth: 4, limit: 5 });

        fs::write(&project, r#"{"depth": 3}"#).unwrap();
        let config = Config::load_first(&[project, user]).unwrap();
        // Missing keys fall back to defaults
        assert_eq!(config, Config { depth: 3, limit: 20 });
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "depth = 3").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
