//! Style settings consumed by rules.
//!
//! The style-configuration file is JSON and opaque to the pipeline. Rules
//! look values up by JSON pointer, e.g. `/settings/layout/maxLineLength`.

use crate::config::ConfigError;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Parsed style-configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSettings {
    root: Value,
}

impl StyleSettings {
    /// Creates empty settings; every lookup falls back to its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads settings from a JSON file. A missing file yields empty settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            debug!("No style settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        })
    }

    /// Parses settings from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let root = serde_json::from_str(content).map_err(|e| ConfigError::Parse {
            path: None,
            message: e.to_string(),
        })?;
        Ok(Self { root })
    }

    /// Returns the raw value at a JSON pointer.
    #[must_use]
    pub fn get(&self, pointer: &str) -> Option<&Value> {
        self.root.pointer(pointer)
    }

    /// Gets a boolean setting with a default value.
    #[must_use]
    pub fn get_bool(&self, pointer: &str, default: bool) -> bool {
        self.get(pointer).and_then(Value::as_bool).unwrap_or(default)
    }

    /// Gets an unsigned integer setting with a default value.
    #[must_use]
    pub fn get_u64(&self, pointer: &str, default: u64) -> u64 {
        self.get(pointer).and_then(Value::as_u64).unwrap_or(default)
    }
}

impl From<Value> for StyleSettings {
    fn from(root: Value) -> Self {
        Self { root }
    }
}
