//! Settings file for the schema CLI
//!
//! ```toml
//! [schema]
//! index_policy = "reject"
//!
//! [output]
//! pretty = true
//! ```

use std::path::Path;

use schema_core::SchemaSettings;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

/// File looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "schema.toml";

/// Output formatting options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Indent JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

/// Complete CLI settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub schema: SchemaSettings,
    #[serde(default)]
    pub output: OutputConfig,
}

impl CliConfig {
    /// Load settings from `path`, or from [`DEFAULT_CONFIG_FILE`] when it
    /// exists, or fall back to defaults.
    ///
    /// An explicitly given path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::read(default)
                } else {
                    tracing::debug!("no settings file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = toml::from_str(&content).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(config)
    }

    /// Serialize `value` as JSON honoring the output settings.
    pub fn to_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.output.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}
