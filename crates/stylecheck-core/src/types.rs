//! Core types for diagnostics and analyzable units.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Severity level for diagnostics, ordered by ascending impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail the run.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that fails the run.
    Error,
}

impl Severity {
    /// Returns the title-case label used in rendered reports.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Path of the source document.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
}

impl Location {
    /// Creates a new location from span information.
    #[must_use]
    pub fn from_span(file: PathBuf, span: proc_macro2::Span) -> Self {
        let start = span.start();
        Self {
            file,
            line: start.line,
            column: start.column + 1,
        }
    }

    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self { file, line, column }
    }
}

/// A single finding produced by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Rule code (e.g., "SC1001").
    pub code: String,
    /// Rule name (e.g., "no-trailing-whitespace").
    pub rule: String,
    /// Severity of this diagnostic.
    pub severity: Severity,
    /// Location of the finding.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            location,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.code,
            self.message
        )
    }
}

/// One resolved scope of source documents sharing a configuration.
///
/// Created by the target resolver and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzableUnit {
    root: PathBuf,
    style_config: PathBuf,
    documents: Vec<PathBuf>,
}

impl AnalyzableUnit {
    /// Creates a unit; documents are sorted and deduplicated by path.
    #[must_use]
    pub fn new(root: PathBuf, style_config: PathBuf, mut documents: Vec<PathBuf>) -> Self {
        documents.sort();
        documents.dedup();
        Self {
            root,
            style_config,
            documents,
        }
    }

    /// Source root of this unit (directory, package directory or single file).
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Style-configuration file this unit was resolved with.
    #[must_use]
    pub fn style_config(&self) -> &Path {
        &self.style_config
    }

    /// Source documents in path order.
    #[must_use]
    pub fn documents(&self) -> &[PathBuf] {
        &self.documents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_by_impact() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn severity_labels_are_title_case() {
        assert_eq!(Severity::Info.label(), "Info");
        assert_eq!(Severity::Warning.label(), "Warning");
        assert_eq!(Severity::Error.label(), "Error");
        assert_eq!(Severity::Error.to_string(), "error");
    }

    #[test]
    fn diagnostic_display_is_compact() {
        let d = Diagnostic::new(
            "SC1001",
            "no-trailing-whitespace",
            Severity::Warning,
            Location::new(PathBuf::from("src/lib.rs"), 3, 7),
            "trailing whitespace",
        );
        assert_eq!(
            d.to_string(),
            "src/lib.rs:3:7: warning [SC1001] trailing whitespace"
        );
    }

    #[test]
    fn unit_sorts_and_dedups_documents() {
        let unit = AnalyzableUnit::new(
            PathBuf::from("/p"),
            PathBuf::from("/p/stylecheck.json"),
            vec![
                PathBuf::from("/p/b.rs"),
                PathBuf::from("/p/a.rs"),
                PathBuf::from("/p/b.rs"),
            ],
        );
        assert_eq!(
            unit.documents(),
            &[PathBuf::from("/p/a.rs"), PathBuf::from("/p/b.rs")]
        );
    }
}
