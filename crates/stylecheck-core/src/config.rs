//! Ruleset file types for stylecheck.

use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Top-level ruleset configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule configurations, keyed by rule name or rule code.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleConfig>,
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
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

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or a value is out of range.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: None,
            message: e.to_string(),
        })?;
        if config.analyzer.parallelism == Some(0) {
            return Err(ConfigError::Parse {
                path: None,
                message: "analyzer.parallelism must be at least 1".to_string(),
            });
        }
        Ok(config)
    }

    /// Looks up the configuration for a rule by name, then by code.
    #[must_use]
    pub fn rule(&self, name: &str, code: &str) -> Option<&RuleConfig> {
        self.rules.get(name).or_else(|| self.rules.get(code))
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Maximum number of units analyzed in parallel.
    #[serde(default)]
    pub parallelism: Option<usize>,
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading a configuration file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in a configuration file.
    #[error("Failed to parse config{}: {message}", in_file(.path))]
    Parse {
        /// File being parsed, when known.
        path: Option<PathBuf>,
        /// Parse error message.
        message: String,
    },
}

fn in_file(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.analyzer.parallelism.is_none());
        assert!(config.rules.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[analyzer]
parallelism = 2

[rules.no-trailing-whitespace]
enabled = false

[rules.SC1003]
severity = "error"
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.analyzer.parallelism, Some(2));

        let by_name = config.rule("no-trailing-whitespace", "SC1001").unwrap();
        assert_eq!(by_name.enabled, Some(false));

        let by_code = config.rule("max-line-length", "SC1003").unwrap();
        assert_eq!(by_code.severity, Some(Severity::Error));
    }

    #[test]
    fn name_entry_wins_over_code_entry() {
        let toml = r#"
[rules.max-line-length]
severity = "warning"

[rules.SC1003]
severity = "error"
"#;
        let config = Config::parse(toml).unwrap();
        let rule = config.rule("max-line-length", "SC1003").unwrap();
        assert_eq!(rule.severity, Some(Severity::Warning));
    }

    #[test]
    fn rejects_unknown_severity() {
        let err = Config::parse("[rules.x]\nseverity = \"fatal\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn rejects_zero_parallelism() {
        let err = Config::parse("[analyzer]\nparallelism = 0\n").unwrap_err();
        assert!(err.to_string().contains("parallelism"));
    }
}
