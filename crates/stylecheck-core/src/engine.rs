//! Diagnostic engine: runs the active rules over every analyzable unit.
//!
//! Units are evaluated on a bounded rayon pool. Results are gathered in unit
//! order, and within a unit by document path, line and column, so completion
//! order never shows up in the output.

use crate::cancel::CancellationToken;
use crate::context::FileContext;
use crate::registry::{RegisteredRule, RuleRegistry};
use crate::types::{AnalyzableUnit, Diagnostic};

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, trace};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A source document could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Document path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A source document could not be parsed.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Document path.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// The worker pool could not be created.
    #[error("Failed to start analysis workers: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    /// Cancellation was observed at a checkpoint.
    #[error("Analysis cancelled")]
    Cancelled,
}

/// Runs a [`RuleRegistry`] against analyzable units.
#[derive(Debug)]
pub struct DiagnosticEngine<'r> {
    registry: &'r RuleRegistry,
}

impl<'r> DiagnosticEngine<'r> {
    /// Creates an engine over a shared registry.
    #[must_use]
    pub fn new(registry: &'r RuleRegistry) -> Self {
        Self { registry }
    }

    /// Analyzes every unit and returns the ordered diagnostic sequence.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Cancelled`] if `cancel` is set before or
    /// during evaluation, otherwise the first failure in unit order.
    pub fn run(
        &self,
        units: &[AnalyzableUnit],
        cancel: &CancellationToken,
    ) -> Result<Vec<Diagnostic>, AnalysisError> {
        if cancel.is_cancelled() {
            return Err(AnalysisError::Cancelled);
        }

        info!(
            "Analyzing {} unit(s) with {} rule(s)",
            units.len(),
            self.registry.enabled_count()
        );

        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(threads) = self.registry.parallelism() {
            builder = builder.num_threads(threads);
        }
        let pool = builder.build()?;

        // Indexed collect keeps unit order regardless of completion order
        let per_unit: Vec<Result<Vec<Diagnostic>, AnalysisError>> = pool.install(|| {
            units
                .par_iter()
                .map(|unit| self.analyze_unit(unit, cancel))
                .collect()
        });

        if cancel.is_cancelled() {
            info!("Analysis cancelled");
            return Err(AnalysisError::Cancelled);
        }

        let mut diagnostics = Vec::new();
        for result in per_unit {
            diagnostics.extend(result?);
        }

        info!("Analysis complete: {} diagnostic(s)", diagnostics.len());

        Ok(diagnostics)
    }

    fn analyze_unit(
        &self,
        unit: &AnalyzableUnit,
        cancel: &CancellationToken,
    ) -> Result<Vec<Diagnostic>, AnalysisError> {
        if cancel.is_cancelled() {
            debug!("Not starting {}: cancelled", unit.root().display());
            return Err(AnalysisError::Cancelled);
        }

        debug!(
            "Analyzing unit {} ({} document(s), style config {})",
            unit.root().display(),
            unit.documents().len(),
            unit.style_config().display()
        );

        let mut diagnostics = Vec::new();
        for document in unit.documents() {
            diagnostics.extend(self.analyze_document(unit.root(), document, cancel)?);
        }
        Ok(diagnostics)
    }

    fn analyze_document(
        &self,
        root: &Path,
        document: &Path,
        cancel: &CancellationToken,
    ) -> Result<Vec<Diagnostic>, AnalysisError> {
        debug!("Analyzing: {}", document.display());

        let content = std::fs::read_to_string(document).map_err(|source| AnalysisError::Read {
            path: document.to_path_buf(),
            source,
        })?;
        let ast = syn::parse_file(&content).map_err(|e| {
            let start = e.span().start();
            AnalysisError::Parse {
                path: document.to_path_buf(),
                message: format!("{}:{}: {e}", start.line, start.column + 1),
            }
        })?;

        let ctx = FileContext::new(document, &content, root, self.registry.settings());
        let mut diagnostics = Vec::new();

        for entry in self.registry.enabled() {
            if cancel.is_cancelled() {
                return Err(AnalysisError::Cancelled);
            }

            let found = entry.rule().check(&ctx, &ast);
            trace!("{} reported {} finding(s)", entry.rule().name(), found.len());
            diagnostics.extend(found.into_iter().map(|d| self.remap(entry, document, d)));
        }

        // Stable: findings at the same position keep rule order
        diagnostics.sort_by(|a, b| {
            a.location
                .line
                .cmp(&b.location.line)
                .then(a.location.column.cmp(&b.location.column))
        });

        Ok(diagnostics)
    }

    /// Pins a raw finding to its document and its configured severity.
    fn remap(&self, entry: &RegisteredRule, document: &Path, mut d: Diagnostic) -> Diagnostic {
        let severity = self
            .registry
            .severity_of(&d.code)
            .unwrap_or_else(|| entry.severity());
        if d.severity != severity {
            trace!("Remapping {} from {} to {}", d.code, d.severity, severity);
            d.severity = severity;
        }
        document.clone_into(&mut d.location.file);
        d
    }
}
