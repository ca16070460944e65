//! cache/config.rs
//! Settings for the directory-backed voxel cache.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CACHE_DIR: &str = "voxel-cache";
pub const DEFAULT_EXTENSION: &str = "vox";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read cache config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid cache config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid cache config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory holding artifact files. Created on first store.
    pub directory: PathBuf,
    /// File extension for artifacts, without the dot.
    pub extension: String,
    /// Delete the file left behind by a failed store.
    pub remove_failed_writes: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_CACHE_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
            remove_failed_writes: true,
        }
    }
}

impl CacheConfig {
    pub fn with_directory(directory: impl Into<PathBuf>) -> Self {
        Self { directory: directory.into(), ..Default::default() }
    }

    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let cfg: CacheConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extension.is_empty() {
            return Err(ConfigError::Invalid("extension must not be empty".into()));
        }
        if self.extension.contains(&['/', '\\', '.'][..]) {
            return Err(ConfigError::Invalid(format!(
                "extension must be a bare suffix, got {:?}",
                self.extension
            )));
        }
        if self.directory.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("directory must not be empty".into()));
        }
        Ok(())
    }
}
