//! Rule forbidding whitespace at the end of a line.

use stylecheck_core::{Diagnostic, FileContext, Location, Rule, Severity};

/// Rule code for no-trailing-whitespace.
pub const CODE: &str = "SC1001";

/// Rule name for no-trailing-whitespace.
pub const NAME: &str = "no-trailing-whitespace";

/// Forbids spaces and tabs after the last visible character of a line.
#[derive(Debug, Clone)]
pub struct NoTrailingWhitespace {
    /// Severity level.
    pub severity: Severity,
}

impl Default for NoTrailingWhitespace {
    fn default() -> Self {
        Self::new()
    }
}

impl NoTrailingWhitespace {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }
}

impl Rule for NoTrailingWhitespace {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids whitespace at the end of a line"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, _ast: &syn::File) -> Vec<Diagnostic> {
        ctx.numbered_lines()
            .filter_map(|(n, line)| {
                let kept = line.trim_end_matches([' ', '\t']);
                (kept.len() != line.len()).then(|| {
                    Diagnostic::new(
                        CODE,
                        NAME,
                        self.severity,
                        Location::new(ctx.path.to_path_buf(), n, kept.chars().count() + 1),
                        "Line has trailing whitespace",
                    )
                })
            })
            .collect()
    }
}
