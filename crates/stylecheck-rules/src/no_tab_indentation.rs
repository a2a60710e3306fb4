//! Rule forbidding tab characters in indentation.
//!
//! Projects that indent with tabs opt out through the style settings:
//!
//! ```json
//! { "settings": { "indentation": { "useTabs": true } } }
//! ```

use stylecheck_core::{Diagnostic, FileContext, Location, Rule, Severity};

/// Rule code for no-tab-indentation.
pub const CODE: &str = "SC1002";

/// Rule name for no-tab-indentation.
pub const NAME: &str = "no-tab-indentation";

/// Style setting that turns this rule off when `true`.
pub const USE_TABS_POINTER: &str = "/settings/indentation/useTabs";

/// Forbids tabs in leading whitespace.
#[derive(Debug, Clone)]
pub struct NoTabIndentation {
    /// Severity level.
    pub severity: Severity,
}

impl Default for NoTabIndentation {
    fn default() -> Self {
        Self::new()
    }
}

impl NoTabIndentation {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }
}

impl Rule for NoTabIndentation {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids tab characters in indentation"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, _ast: &syn::File) -> Vec<Diagnostic> {
        if ctx.settings.get_bool(USE_TABS_POINTER, false) {
            return Vec::new();
        }

        ctx.numbered_lines()
            .filter_map(|(n, line)| {
                line.chars()
                    .take_while(|c| *c == ' ' || *c == '\t')
                    .position(|c| c == '\t')
                    .map(|col| {
                        Diagnostic::new(
                            CODE,
                            NAME,
                            self.severity,
                            Location::new(ctx.path.to_path_buf(), n, col + 1),
                            "Indentation contains a tab character",
                        )
                    })
            })
            .collect()
    }
}
