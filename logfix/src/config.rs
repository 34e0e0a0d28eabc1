//! Fix options loaded from `logfix.toml`

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// File name looked up next to the fixed document when no config is given
pub const CONFIG_FILE_NAME: &str = "logfix.toml";

/// Errors raised while loading [`FixOptions`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config{}: {message}", path.as_ref().map(|p| format!(" {}", p.display())).unwrap_or_default())]
    Invalid {
        path: Option<PathBuf>,
        message: String,
    },
}

/// Options shared by every rewrite strategy
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct FixOptions {
    /// Zero-argument calls to this method are dropped in favor of their receiver
    pub stringify_method: String,
    /// Operator whose holes are kept verbatim
    pub nameof_operator: String,
    /// Base type that marks a value as an error to hoist
    pub error_base_type: String,
    /// Leading arguments inspected before offering the structured rewrite
    pub max_checked_arguments: usize,
    /// Extra `Derived = "Base"` entries for the declaration oracle
    pub types: BTreeMap<String, String>,
}

impl Default for FixOptions {
    fn default() -> Self {
        Self {
            stringify_method: "ToString".to_string(),
            nameof_operator: "nameof".to_string(),
            error_base_type: "System.Exception".to_string(),
            max_checked_arguments: 3,
            types: BTreeMap::new(),
        }
    }
}

impl FixOptions {
    /// Parse options from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Invalid {
            path: None,
            message: e.to_string(),
        })
    }

    /// Load options from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|e| ConfigError::Invalid {
            path: Some(path.to_path_buf()),
            message: e.to_string(),
        })
    }

    /// Load `logfix.toml` from `dir` if present, defaults otherwise
    pub fn discover(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let candidate = dir.as_ref().join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(candidate)
        } else {
            Ok(Self::default())
        }
    }
}
