//! TOML configuration loading
//!
//! All keys are optional and kebab-case:
//!
//! ```toml
//! [dispatcher]
//! thread-name = "spock-run-listener"
//! stack-size = 262144
//!
//! [logging]
//! level = "debug"
//! format = "ext"
//! file = "/tmp/relay.log"
//! color = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_THREAD_NAME: &str = "async-run-listener";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Error reading configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing configuration: {message}")]
    Parse { message: String },

    #[error("Invalid value for '{field}': {message}")]
    Invalid { field: String, message: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings for the dispatcher worker thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct DispatcherConfig {
    pub thread_name: String,
    /// Worker stack size in bytes; platform default when unset
    pub stack_size: Option<usize>,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            thread_name: DEFAULT_THREAD_NAME.to_string(),
            stack_size: None,
        }
    }
}

impl DispatcherConfig {
    pub fn named(thread_name: impl Into<String>) -> Self {
        Self {
            thread_name: thread_name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// `YYYY-MM-DD HH:MM:SS.mmm LVL message`
    #[default]
    Text,
    /// Text plus `(module/path.rs:line)`
    Ext,
    /// One compact JSON object per record
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct LoggingConfig {
    /// A flexi_logger spec such as `info` or `warn, runrelay=trace`
    pub level: String,
    pub format: LogFormat,
    pub file: Option<PathBuf>,
    pub color: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            file: None,
            color: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelayConfig {
    pub dispatcher: DispatcherConfig,
    pub logging: LoggingConfig,
}

impl RelayConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(contents).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// `<config dir>/Runrelay/runrelay.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("Runrelay").join("runrelay.toml"))
    }

    /// Load the default configuration file if it exists, otherwise defaults
    pub fn discover() -> ConfigResult<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => {
                log::debug!("Loading configuration from {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.dispatcher.thread_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "dispatcher.thread-name".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.dispatcher.thread_name.contains('\0') {
            return Err(ConfigError::Invalid {
                field: "dispatcher.thread-name".to_string(),
                message: "must not contain NUL bytes".to_string(),
            });
        }
        if self.dispatcher.stack_size == Some(0) {
            return Err(ConfigError::Invalid {
                field: "dispatcher.stack-size".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        flexi_logger::LogSpecification::parse(&self.logging.level).map_err(|e| {
            ConfigError::Invalid {
                field: "logging.level".to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(())
    }
}
