//! # stylecheck-rules
//!
//! Built-in style rules for stylecheck.
//!
//! ## Available Rules
//!
//! | Code | Name | Default | Description |
//! |------|------|---------|-------------|
//! | SC1001 | `no-trailing-whitespace` | warning | Forbids whitespace at the end of a line |
//! | SC1002 | `no-tab-indentation` | warning | Forbids tabs in indentation unless `indentation.useTabs` is set |
//! | SC1003 | `max-line-length` | info | Limits line length to `layout.maxLineLength` (default 100) |
//! | SC1004 | `type-name-upper-camel-case` | error | Requires `UpperCamelCase` type and trait names |
//!
//! ## Usage
//!
//! ```ignore
//! use stylecheck_core::{run_check, CancellationToken, CheckOptions, PlainSink};
//!
//! let mut sink = PlainSink::new(std::io::stdout());
//! run_check(
//!     &CheckOptions::new(["."]),
//!     stylecheck_rules::all_rules(),
//!     &CancellationToken::new(),
//!     &mut sink,
//! )?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod max_line_length;
mod no_tab_indentation;
mod no_trailing_whitespace;
mod type_name_upper_camel_case;

pub use catalog::all_rules;
pub use max_line_length::MaxLineLength;
pub use no_tab_indentation::NoTabIndentation;
pub use no_trailing_whitespace::NoTrailingWhitespace;
pub use type_name_upper_camel_case::TypeNameUpperCamelCase;

/// Re-export core types for convenience.
pub use stylecheck_core::{Diagnostic, Rule, Severity};
