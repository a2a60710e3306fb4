//! Rule trait for defining style rules.

use crate::context::FileContext;
use crate::types::{Diagnostic, Severity};

/// A per-document style rule based on `syn` AST analysis.
///
/// Rules receive the parsed AST together with the raw text, so lexical rules
/// can scan lines while structural rules use the visitor pattern.
///
/// # Example
///
/// ```ignore
/// use stylecheck_core::{Diagnostic, FileContext, Location, Rule};
///
/// pub struct NoTodoComments;
///
/// impl Rule for NoTodoComments {
///     fn name(&self) -> &'static str { "no-todo-comments" }
///     fn code(&self) -> &'static str { "SC9001" }
///
///     fn check(&self, ctx: &FileContext, _ast: &syn::File) -> Vec<Diagnostic> {
///         ctx.numbered_lines()
///             .filter(|(_, line)| line.contains("TODO"))
///             .map(|(n, _)| Diagnostic::new(
///                 self.code(),
///                 self.name(),
///                 self.default_severity(),
///                 Location::new(ctx.path.to_path_buf(), n, 1),
///                 "TODO comment",
///             ))
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "max-line-length").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "SC1003").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the severity used when the ruleset does not override it.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Checks a single document and returns any findings.
    ///
    /// The severity carried by returned diagnostics is advisory; the engine
    /// replaces it with the severity configured for this rule.
    fn check(&self, ctx: &FileContext, ast: &syn::File) -> Vec<Diagnostic>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
