//! Rule limiting line length.

use stylecheck_core::{Diagnostic, FileContext, Location, Rule, Severity};

/// Rule code for max-line-length.
pub const CODE: &str = "SC1003";

/// Rule name for max-line-length.
pub const NAME: &str = "max-line-length";

/// Style setting holding the limit.
pub const MAX_LINE_LENGTH_POINTER: &str = "/settings/layout/maxLineLength";

/// Limit used when the style settings do not provide one.
pub const DEFAULT_MAX_LINE_LENGTH: u64 = 100;

/// Reports lines longer than the configured limit, counted in characters.
#[derive(Debug, Clone)]
pub struct MaxLineLength {
    /// Severity level.
    pub severity: Severity,
}

impl Default for MaxLineLength {
    fn default() -> Self {
        Self::new()
    }
}

impl MaxLineLength {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Info,
        }
    }
}

impl Rule for MaxLineLength {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Limits line length (layout.maxLineLength, default 100)"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, _ast: &syn::File) -> Vec<Diagnostic> {
        let limit = usize::try_from(
            ctx.settings
                .get_u64(MAX_LINE_LENGTH_POINTER, DEFAULT_MAX_LINE_LENGTH),
        )
        .unwrap_or(usize::MAX);

        ctx.numbered_lines()
            .filter_map(|(n, line)| {
                let length = line.chars().count();
                (length > limit).then(|| {
                    Diagnostic::new(
                        CODE,
                        NAME,
                        self.severity,
                        Location::new(ctx.path.to_path_buf(), n, limit + 1),
                        format!("Line is {length} characters long (limit {limit})"),
                    )
                })
            })
            .collect()
    }
}
