//! Core configuration.
//!
//! Precedence, highest first:
//! 1. `LIFTOFF_*` environment variables
//! 2. Config file (`~/.config/liftoff/config.toml`, or `LIFTOFF_CONFIG`)
//! 3. Built-in defaults

use crate::net::DEFAULT_API_PATH_MARKER;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

const ENV_PREFIX: &str = "LIFTOFF";
const STORE_FILE_NAME: &str = "liftoff_store.sqlite3";

/// Configuration load/save failures.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: Option<PathBuf>,
        source: toml::de::Error,
    },
    Serialize(toml::ser::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "config file io failed at `{}`: {source}", path.display())
            }
            Self::Parse {
                path: Some(path),
                source,
            } => write!(f, "invalid config file `{}`: {source}", path.display()),
            Self::Parse { path: None, source } => write!(f, "invalid config: {source}"),
            Self::Serialize(err) => write!(f, "config serialization failed: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
        }
    }
}

/// Settings for the store, logging and outbound API calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Directory holding the store database.
    pub data_dir: PathBuf,
    /// Rolling log directory. Defaults to `<data_dir>/logs`.
    pub log_dir: Option<PathBuf>,
    pub log_level: String,
    /// Base URL prefixed to relative API paths.
    pub api_base_url: Option<String>,
    /// Path segment that marks a request as backend-bound.
    pub api_path_marker: String,
    pub request_timeout_secs: u64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_dir: None,
            log_level: crate::logging::default_log_level().to_string(),
            api_base_url: None,
            api_path_marker: DEFAULT_API_PATH_MARKER.to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl CoreConfig {
    /// Loads `path` (defaults when missing) and applies environment overrides.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: Some(path.to_path_buf()),
                source,
            })?
        } else {
            Self::default()
        };

        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Parses TOML without consulting the environment.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse { path: None, source })
    }

    /// Applies `LIFTOFF_*` overrides resolved through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |suffix: &str| lookup(&format!("{ENV_PREFIX}_{suffix}"));

        if let Some(value) = var("DATA_DIR") {
            self.data_dir = PathBuf::from(value);
        }
        if let Some(value) = var("LOG_DIR") {
            self.log_dir = (!value.is_empty()).then(|| PathBuf::from(value));
        }
        if let Some(value) = var("LOG_LEVEL") {
            self.log_level = value;
        }
        if let Some(value) = var("API_BASE_URL") {
            self.api_base_url = (!value.is_empty()).then_some(value);
        }
        if let Some(value) = var("API_PATH_MARKER") {
            if !value.trim().is_empty() {
                self.api_path_marker = value;
            }
        }
    }

    /// Writes the config as TOML, creating parent directories.
    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{ENV_PREFIX}_CONFIG")) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("liftoff")
            .join("config.toml")
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE_NAME)
    }

    pub fn resolved_log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("logs"))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("liftoff")
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig};
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = CoreConfig::from_toml_str("").expect("empty config parses");
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.api_path_marker, "/api/");
        assert!(config.store_path().ends_with("liftoff_store.sqlite3"));
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = CoreConfig::from_toml_str(
            r#"
            data_dir = "/tmp/liftoff-test"
            api_base_url = "http://localhost:5000"
            "#,
        )
        .expect("config parses");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/liftoff-test"));
        assert_eq!(config.api_base_url.as_deref(), Some("http://localhost:5000"));
        assert_eq!(config.resolved_log_dir(), PathBuf::from("/tmp/liftoff-test/logs"));
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = CoreConfig::from_toml_str("request_timeout_secs = \"soon\"")
            .expect_err("wrong type must fail");
        assert!(matches!(err, ConfigError::Parse { path: None, .. }));
    }

    #[test]
    fn overrides_replace_values_and_clear_optionals() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("LIFTOFF_DATA_DIR", "/srv/liftoff"),
            ("LIFTOFF_LOG_LEVEL", "warn"),
            ("LIFTOFF_API_BASE_URL", ""),
            ("LIFTOFF_API_PATH_MARKER", "  "),
        ]);
        let mut config = CoreConfig {
            api_base_url: Some("http://old".to_string()),
            ..CoreConfig::default()
        };
        config.apply_overrides(|name| env.get(name).map(|value| value.to_string()));

        assert_eq!(config.data_dir, PathBuf::from("/srv/liftoff"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.api_base_url, None);
        assert_eq!(config.api_path_marker, "/api/");
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("config.toml");
        let config = CoreConfig {
            data_dir: dir.path().to_path_buf(),
            log_level: "trace".to_string(),
            ..CoreConfig::default()
        };
        config.save_to_path(&path).expect("config saves");

        let content = std::fs::read_to_string(&path).expect("file written");
        let loaded = CoreConfig::from_toml_str(&content).expect("config reloads");
        assert_eq!(loaded, config);
    }
}
