//! # stylecheck-core
//!
//! Orchestration framework for running style rules over Rust projects.
//!
//! A check run goes through four stages:
//!
//! - [`TargetResolver`] expands manifests, directories and files into
//!   [`AnalyzableUnit`]s
//! - [`RuleRegistry`] combines a rule catalog with the ruleset and the
//!   style settings
//! - [`DiagnosticEngine`] evaluates units in parallel and returns one
//!   deterministic [`Diagnostic`] sequence
//! - [`OutputKind`] selects a [`DiagnosticWriter`] that renders the report
//!
//! [`run_check`] drives all of them and returns a [`RunResult`].
//!
//! ## Example
//!
//! ```ignore
//! use stylecheck_core::{run_check, CancellationToken, CheckOptions, PlainSink};
//!
//! let options = CheckOptions::new(["Cargo.toml"]);
//! let mut sink = PlainSink::new(std::io::stdout());
//! let result = run_check(&options, stylecheck_rules::all_rules(), &CancellationToken::new(), &mut sink)?;
//! std::process::exit(i32::from(result.exit_status()));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cancel;
mod check;
mod config;
mod context;
mod engine;
mod error;
mod output;
mod registry;
mod resolver;
mod rule;
mod settings;
mod summary;
mod types;

pub use cancel::CancellationToken;
pub use check::{run_check, CheckOptions, Stage, DEFAULT_STYLE_CONFIG};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::FileContext;
pub use engine::{AnalysisError, DiagnosticEngine};
pub use error::{CheckError, EXIT_CANCELLED, EXIT_FAILURE};
pub use output::{
    render_line, DiagnosticWriter, FormatError, LineSink, LineStyle, OutputKind, PlainSink,
    StyledLine, TextWriter, XmlWriter,
};
pub use registry::{RegisteredRule, RuleRegistry};
pub use resolver::{
    ResolveError, ResolveOptions, TargetKind, TargetResolver, MANIFEST_NAME, SOURCE_EXTENSION,
};
pub use rule::{Rule, RuleBox};
pub use settings::StyleSettings;
pub use summary::RunResult;
pub use types::{AnalyzableUnit, Diagnostic, Location, Severity};
