//! End-to-end check run: resolve, load rules, analyze, report.

use crate::cancel::CancellationToken;
use crate::engine::DiagnosticEngine;
use crate::error::CheckError;
use crate::output::{LineSink, OutputKind};
use crate::registry::RuleRegistry;
use crate::resolver::{ResolveError, ResolveOptions, TargetResolver};
use crate::rule::RuleBox;
use crate::summary::RunResult;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};

/// Default style-configuration file name.
pub const DEFAULT_STYLE_CONFIG: &str = "stylecheck.json";

/// Inputs of one check run.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Paths to manifests, directories or source files.
    pub targets: Vec<String>,
    /// Ruleset file; `None` uses default severities.
    pub ruleset: Option<PathBuf>,
    /// Style-settings file passed to every rule.
    pub style_config: PathBuf,
    /// Output format name (`text` or `xml`).
    pub format: String,
    /// Only print error-severity diagnostics in the text report.
    pub errors_only: bool,
    /// Glob patterns for documents to skip.
    pub exclude: Vec<String>,
    /// Honor `.gitignore` while walking directories.
    pub respect_gitignore: bool,
}

impl CheckOptions {
    /// Creates options for `targets` with every other setting at its default.
    #[must_use]
    pub fn new<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let defaults = ResolveOptions::new(DEFAULT_STYLE_CONFIG);
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
            ruleset: None,
            style_config: defaults.style_config,
            format: OutputKind::Text.name().to_string(),
            errors_only: false,
            exclude: defaults.exclude,
            respect_gitignore: defaults.respect_gitignore,
        }
    }

    fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            style_config: self.style_config.clone(),
            exclude: self.exclude.clone(),
            respect_gitignore: self.respect_gitignore,
        }
    }
}

/// Progress markers of a run, used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Expanding targets into units.
    Resolving,
    /// Reading the ruleset and style settings.
    LoadingRules,
    /// Running rules over documents.
    Analyzing,
    /// Rendering the report.
    Reporting,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Resolving => "resolving",
            Self::LoadingRules => "loading rules",
            Self::Analyzing => "analyzing",
            Self::Reporting => "reporting",
        })
    }
}

fn enter(stage: Stage) {
    debug!("Stage: {stage}");
}

/// Runs a complete check and writes the report to `sink`.
///
/// The returned [`RunResult`] is computed from the full diagnostic
/// sequence, independent of which lines the report shows.
///
/// # Errors
///
/// Fails on the first resolution, configuration, analysis, format or
/// output error, or with [`CheckError::Cancelled`] when `cancel` is set
/// by the time analysis finishes.
pub fn run_check(
    options: &CheckOptions,
    catalog: Vec<RuleBox>,
    cancel: &CancellationToken,
    sink: &mut dyn LineSink,
) -> Result<RunResult, CheckError> {
    debug!(
        targets = ?options.targets,
        ruleset = ?options.ruleset,
        style_config = %options.style_config.display(),
        format = %options.format,
        errors_only = options.errors_only,
        "Check arguments"
    );

    if options.targets.is_empty() {
        return Err(ResolveError::NoTargets.into());
    }
    let kind: OutputKind = options.format.parse()?;

    enter(Stage::Resolving);
    let resolver = TargetResolver::new(options.resolve_options())?;
    let units = resolver.resolve(options.targets.as_slice())?;

    enter(Stage::LoadingRules);
    let registry = RuleRegistry::load(
        catalog,
        options.ruleset.as_deref(),
        &options.style_config,
    )?;

    enter(Stage::Analyzing);
    let diagnostics = DiagnosticEngine::new(&registry).run(&units, cancel)?;

    enter(Stage::Reporting);
    let result = RunResult::summarize(&diagnostics);
    kind.writer(options.errors_only)
        .write(&diagnostics, sink)
        .map_err(CheckError::Output)?;

    info!("{result}");

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_text_and_target_exclude() {
        let options = CheckOptions::new(["."]);
        assert_eq!(options.targets, vec![".".to_string()]);
        assert_eq!(options.format, "text");
        assert_eq!(options.style_config, PathBuf::from(DEFAULT_STYLE_CONFIG));
        assert_eq!(options.exclude, vec!["**/target/**".to_string()]);
        assert!(options.respect_gitignore);
        assert!(!options.errors_only);
        assert!(options.ruleset.is_none());
    }

    #[test]
    fn empty_targets_fail_before_format_check() {
        let mut options = CheckOptions::new(Vec::<String>::new());
        options.format = "zzz".into();
        let mut sink: Vec<crate::output::StyledLine> = Vec::new();

        let err = run_check(&options, Vec::new(), &CancellationToken::new(), &mut sink)
            .unwrap_err();

        assert!(matches!(err, CheckError::Resolution(ResolveError::NoTargets)));
        assert!(sink.is_empty());
    }

    #[test]
    fn stage_names() {
        assert_eq!(Stage::LoadingRules.to_string(), "loading rules");
        assert_eq!(Stage::Reporting.to_string(), "reporting");
    }
}
