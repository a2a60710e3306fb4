//! Terminal failure kinds of a check run.

use crate::config::ConfigError;
use crate::engine::AnalysisError;
use crate::output::FormatError;
use crate::resolver::ResolveError;
use miette::Diagnostic;
use thiserror::Error;

/// Exit status for every failure except cancellation.
pub const EXIT_FAILURE: u8 = 1;

/// Exit status for a run interrupted by the user.
pub const EXIT_CANCELLED: u8 = 130;

/// Why a check run stopped without a result.
#[derive(Debug, Error, Diagnostic)]
pub enum CheckError {
    /// A target could not be resolved.
    #[error(transparent)]
    #[diagnostic(
        code(stylecheck::resolution),
        help("targets must be a Cargo.toml, a directory or a .rs file")
    )]
    Resolution(#[from] ResolveError),

    /// The ruleset or style configuration is malformed.
    #[error(transparent)]
    #[diagnostic(code(stylecheck::configuration))]
    Configuration(#[from] ConfigError),

    /// A unit could not be evaluated.
    #[error(transparent)]
    #[diagnostic(code(stylecheck::analysis))]
    Analysis(AnalysisError),

    /// The output format is not recognized.
    #[error(transparent)]
    #[diagnostic(code(stylecheck::format))]
    Format(#[from] FormatError),

    /// The report could not be written.
    #[error("Failed to write report: {0}")]
    #[diagnostic(code(stylecheck::output))]
    Output(#[source] std::io::Error),

    /// The user cancelled the run.
    #[error("Check cancelled")]
    #[diagnostic(code(stylecheck::cancelled))]
    Cancelled,
}

impl CheckError {
    /// Process exit status for this failure.
    #[must_use]
    pub fn exit_status(&self) -> u8 {
        match self {
            Self::Cancelled => EXIT_CANCELLED,
            _ => EXIT_FAILURE,
        }
    }
}

impl From<AnalysisError> for CheckError {
    fn from(e: AnalysisError) -> Self {
        match e {
            AnalysisError::Cancelled => Self::Cancelled,
            other => Self::Analysis(other),
        }
    }
}
