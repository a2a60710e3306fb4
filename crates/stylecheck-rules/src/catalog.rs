//! The built-in rule catalog.

use crate::{MaxLineLength, NoTabIndentation, NoTrailingWhitespace, TypeNameUpperCamelCase};
use stylecheck_core::RuleBox;

/// Returns every built-in rule at its default severity, ordered by code.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(NoTrailingWhitespace::new()),
        Box::new(NoTabIndentation::new()),
        Box::new(MaxLineLength::new()),
        Box::new(TypeNameUpperCamelCase::new()),
    ]
}
