//! Locating and loading the configuration file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::app_config::AppConfig;

/// File name of the configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot serialize default config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl ConfigError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Where the loaded configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from an existing file.
    File,
    /// No file existed, defaults were written to it.
    CreatedDefault,
    /// The file could not be parsed, defaults are used and the file is kept.
    Fallback,
}

/// Configuration file store rooted at a config directory.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    /// Store in the platform config directory.
    ///
    /// # Errors
    /// Returns `ConfigError::ConfigDirNotFound` if no home directory is known.
    pub fn open() -> Result<Self, ConfigError> {
        AppConfig::default_config_dir()
            .map(Self::at)
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    #[must_use]
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file [`load`](Self::load) reads.
    #[must_use]
    pub fn config_path(&self, path_override: Option<&Path>) -> PathBuf {
        path_override.map_or_else(|| self.dir.join(CONFIG_FILE_NAME), Path::to_path_buf)
    }

    /// Loads the configuration. A missing file is created with the defaults;
    /// a malformed one is left alone and the defaults are used.
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be read or the defaults cannot
    /// be written.
    pub fn load(
        &self,
        path_override: Option<&Path>,
    ) -> Result<(AppConfig, ConfigSource), ConfigError> {
        let path = self.config_path(path_override);

        if !path.exists() {
            info!(path = %path.display(), "Config file not found, creating default");
            let config = AppConfig::default();
            write_atomically(&path, &toml::to_string_pretty(&config)?)?;
            return Ok((config, ConfigSource::CreatedDefault));
        }

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::io(&path, e))?;
        match toml::from_str::<AppConfig>(&content) {
            Ok(config) => {
                debug!(path = %path.display(), "Config loaded");
                Ok((config, ConfigSource::File))
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = e.message(),
                    "Malformed config file, using defaults"
                );
                Ok((AppConfig::default(), ConfigSource::Fallback))
            }
        }
    }
}

/// Replaces `path` with `content` through a temporary file in the same
/// directory, creating the directory if needed.
fn write_atomically(path: &Path, content: &str) -> Result<(), ConfigError> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;

    let mut file =
        tempfile::NamedTempFile::new_in(parent).map_err(|e| ConfigError::io(parent, e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| ConfigError::io(file.path(), e))?;
    file.persist(path).map_err(|e| ConfigError::io(path, e.error))?;
    Ok(())
}
