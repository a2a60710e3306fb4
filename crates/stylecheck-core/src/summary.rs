//! Severity tallies and exit status.

use crate::types::{Diagnostic, Severity};
use serde::Serialize;

/// Per-severity counts of a run and the exit status derived from them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunResult {
    /// Number of info diagnostics.
    pub info: usize,
    /// Number of warning diagnostics.
    pub warning: usize,
    /// Number of error diagnostics.
    pub error: usize,
}

impl RunResult {
    /// Tallies a diagnostic sequence.
    #[must_use]
    pub fn summarize(diagnostics: &[Diagnostic]) -> Self {
        diagnostics
            .iter()
            .fold(Self::default(), |mut acc, d| {
                match d.severity {
                    Severity::Info => acc.info += 1,
                    Severity::Warning => acc.warning += 1,
                    Severity::Error => acc.error += 1,
                }
                acc
            })
    }

    /// Returns true if there is at least one error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.error > 0
    }

    /// Total number of diagnostics.
    #[must_use]
    pub fn total(&self) -> usize {
        self.info + self.warning + self.error
    }

    /// Process exit status: `1` when any error was found, else `0`.
    #[must_use]
    pub fn exit_status(&self) -> u8 {
        u8::from(self.has_errors())
    }
}

impl std::fmt::Display for RunResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Errors: {}, Warnings: {}, Infos: {}",
            self.error, self.warning, self.info
        )
    }
}
