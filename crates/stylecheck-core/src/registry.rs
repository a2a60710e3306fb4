//! Rule registry: the active rule set with configured severities.
//!
//! Built once per run from the rule catalog, the ruleset file and the style
//! settings, then shared read-only across every unit evaluation.

use crate::config::{Config, ConfigError};
use crate::rule::RuleBox;
use crate::settings::StyleSettings;
use crate::types::Severity;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info, warn};

/// A rule together with its effective configuration.
pub struct RegisteredRule {
    rule: RuleBox,
    enabled: bool,
    severity: Severity,
}

impl RegisteredRule {
    /// The rule implementation.
    #[must_use]
    pub fn rule(&self) -> &dyn crate::Rule {
        self.rule.as_ref()
    }

    /// Whether the rule runs.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Severity every finding of this rule carries.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }
}

impl std::fmt::Debug for RegisteredRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredRule")
            .field("code", &self.rule.code())
            .field("name", &self.rule.name())
            .field("enabled", &self.enabled)
            .field("severity", &self.severity)
            .finish()
    }
}

/// Active rules mapped to their enabled flag and configured severity.
#[derive(Debug)]
pub struct RuleRegistry {
    rules: Vec<RegisteredRule>,
    settings: StyleSettings,
    parallelism: Option<usize>,
}

impl RuleRegistry {
    /// Loads the ruleset and style settings and builds the registry.
    ///
    /// `ruleset` of `None`, or a path that does not exist, means every rule
    /// runs with its built-in default severity.
    ///
    /// # Errors
    ///
    /// Returns an error if either file exists but cannot be read or parsed.
    pub fn load(
        catalog: Vec<RuleBox>,
        ruleset: Option<&Path>,
        style_config: &Path,
    ) -> Result<Self, ConfigError> {
        let config = match ruleset {
            Some(path) if path.is_file() => {
                info!("Using ruleset: {}", path.display());
                Config::from_file(path)?
            }
            Some(path) => {
                info!(
                    "Ruleset {} not found, using default severities",
                    path.display()
                );
                Config::default()
            }
            None => {
                debug!("No ruleset given, using default severities");
                Config::default()
            }
        };
        let settings = StyleSettings::from_file(style_config)?;

        Ok(Self::from_config(catalog, &config, settings))
    }

    /// Builds the registry from an already parsed configuration.
    #[must_use]
    pub fn from_config(catalog: Vec<RuleBox>, config: &Config, settings: StyleSettings) -> Self {
        let mut known = BTreeSet::new();
        let rules: Vec<RegisteredRule> = catalog
            .into_iter()
            .map(|rule| {
                known.insert(rule.name());
                known.insert(rule.code());

                let rule_config = config.rule(rule.name(), rule.code());
                let enabled = rule_config.and_then(|c| c.enabled).unwrap_or(true);
                let severity = rule_config
                    .and_then(|c| c.severity)
                    .unwrap_or_else(|| rule.default_severity());
                debug!(
                    "Rule {} ({}): enabled={enabled}, severity={severity}",
                    rule.code(),
                    rule.name()
                );

                RegisteredRule {
                    rule,
                    enabled,
                    severity,
                }
            })
            .collect();

        for key in config.rules.keys() {
            if !known.contains(key.as_str()) {
                warn!("Unknown rule in ruleset: {key}");
            }
        }

        Self {
            rules,
            settings,
            parallelism: config.analyzer.parallelism,
        }
    }

    /// All registered rules in catalog order.
    #[must_use]
    pub fn rules(&self) -> &[RegisteredRule] {
        &self.rules
    }

    /// Enabled rules in catalog order.
    pub fn enabled(&self) -> impl Iterator<Item = &RegisteredRule> {
        self.rules.iter().filter(|r| r.enabled)
    }

    /// Number of enabled rules.
    #[must_use]
    pub fn enabled_count(&self) -> usize {
        self.enabled().count()
    }

    /// Finds a rule by name or code.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&RegisteredRule> {
        self.rules
            .iter()
            .find(|r| r.rule.name() == key || r.rule.code() == key)
    }

    /// Configured severity for a rule, by name or code.
    #[must_use]
    pub fn severity_of(&self, key: &str) -> Option<Severity> {
        self.get(key).map(RegisteredRule::severity)
    }

    /// Style settings handed to every rule.
    #[must_use]
    pub fn settings(&self) -> &StyleSettings {
        &self.settings
    }

    /// Configured upper bound on concurrently analyzed units.
    #[must_use]
    pub fn parallelism(&self) -> Option<usize> {
        self.parallelism
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::FileContext;
    use crate::rule::Rule;
    use crate::types::Diagnostic;
    use std::fs;
    use tempfile::TempDir;

    struct Fixed(&'static str, &'static str, Severity);

    impl Rule for Fixed {
        fn name(&self) -> &'static str {
            self.0
        }
        fn code(&self) -> &'static str {
            self.1
        }
        fn default_severity(&self) -> Severity {
            self.2
        }
        fn check(&self, _ctx: &FileContext, _ast: &syn::File) -> Vec<Diagnostic> {
            Vec::new()
        }
    }

    fn catalog() -> Vec<RuleBox> {
        vec![
            Box::new(Fixed("alpha", "T001", Severity::Warning)),
            Box::new(Fixed("beta", "T002", Severity::Info)),
        ]
    }

    #[test]
    fn absent_ruleset_uses_default_severities() {
        let tmp = TempDir::new().unwrap();
        let registry = RuleRegistry::load(
            catalog(),
            Some(&tmp.path().join("stylecheck.toml")),
            &tmp.path().join("stylecheck.json"),
        )
        .unwrap();

        assert_eq!(registry.enabled_count(), 2);
        assert_eq!(registry.severity_of("alpha"), Some(Severity::Warning));
        assert_eq!(registry.severity_of("T002"), Some(Severity::Info));
    }

    #[test]
    fn no_ruleset_uses_default_severities() {
        let tmp = TempDir::new().unwrap();
        let registry =
            RuleRegistry::load(catalog(), None, &tmp.path().join("stylecheck.json")).unwrap();
        assert_eq!(registry.enabled_count(), 2);
    }

    #[test]
    fn ruleset_overrides_severity_and_enablement() {
        let tmp = TempDir::new().unwrap();
        let ruleset = tmp.path().join("stylecheck.toml");
        fs::write(
            &ruleset,
            "[rules.alpha]\nseverity = \"error\"\n\n[rules.T002]\nenabled = false\n",
        )
        .unwrap();

        let registry =
            RuleRegistry::load(catalog(), Some(&ruleset), &tmp.path().join("none.json")).unwrap();

        assert_eq!(registry.severity_of("T001"), Some(Severity::Error));
        assert!(!registry.get("beta").unwrap().enabled());
        let enabled: Vec<_> = registry.enabled().map(|r| r.rule().name()).collect();
        assert_eq!(enabled, vec!["alpha"]);
    }

    #[test]
    fn malformed_ruleset_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let ruleset = tmp.path().join("stylecheck.toml");
        fs::write(&ruleset, "[rules.alpha\nseverity = ").unwrap();

        let err = RuleRegistry::load(catalog(), Some(&ruleset), &tmp.path().join("none.json"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn malformed_style_settings_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let style = tmp.path().join("stylecheck.json");
        fs::write(&style, "[1, 2").unwrap();

        let err = RuleRegistry::load(catalog(), None, &style).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn unknown_rule_keys_are_ignored() {
        let config = Config::parse("[rules.gamma]\nenabled = false\n").unwrap();
        let registry = RuleRegistry::from_config(catalog(), &config, StyleSettings::new());
        assert_eq!(registry.enabled_count(), 2);
        assert!(registry.get("gamma").is_none());
    }

    #[test]
    fn carries_parallelism() {
        let config = Config::parse("[analyzer]\nparallelism = 3\n").unwrap();
        let registry = RuleRegistry::from_config(catalog(), &config, StyleSettings::new());
        assert_eq!(registry.parallelism(), Some(3));
    }
}
