//! Check command implementation.

use clap::Args;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use stylecheck_core::{
    run_check, CancellationToken, CheckError, CheckOptions, RunResult, DEFAULT_STYLE_CONFIG,
    EXIT_FAILURE,
};
use stylecheck_rules::all_rules;

use super::output::TerminalSink;
use crate::config_resolver::{self, RulesetSource};

/// Arguments of the `check` subcommand.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Cargo.toml manifests, directories or .rs files to check
    pub targets: Vec<String>,

    /// Ruleset file (default: ./stylecheck.toml, then ~/.stylecheck/ruleset.toml)
    #[arg(short, long)]
    pub ruleset: Option<PathBuf>,

    /// Style settings file
    #[arg(short, long, default_value = DEFAULT_STYLE_CONFIG)]
    pub json: PathBuf,

    /// Output format: text or xml
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Only print error diagnostics (text output)
    #[arg(short, long)]
    pub errors_only: bool,

    /// Additional exclude patterns (can be specified multiple times)
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Do not honor .gitignore files
    #[arg(long)]
    pub no_gitignore: bool,
}

impl CheckArgs {
    /// Builds pipeline options, resolving the ruleset against `project_dir`.
    fn into_options(self, project_dir: &Path) -> CheckOptions {
        let source = config_resolver::resolve(project_dir, self.ruleset.as_deref());
        if let RulesetSource::Global(p) = &source {
            tracing::info!("Using global ruleset: {}", p.display());
        }

        let mut options = CheckOptions::new(self.targets);
        options.ruleset = source.into_path();
        options.style_config = self.json;
        options.format = self.format;
        options.errors_only = self.errors_only;
        options.exclude.extend(self.exclude);
        options.respect_gitignore = !self.no_gitignore;
        options
    }
}

/// Runs the check command until it completes or Ctrl-C is pressed.
pub async fn run(args: CheckArgs) -> ExitCode {
    let options = args.into_options(Path::new("."));
    let cancel = CancellationToken::new();

    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, cancelling check");
            on_interrupt.cancel();
        }
    });

    let outcome = tokio::task::spawn_blocking(move || {
        let mut sink = TerminalSink::stdout();
        run_check(&options, all_rules(), &cancel, &mut sink)
    })
    .await;

    match outcome {
        Ok(result) => exit_code(result),
        Err(e) => {
            eprintln!("{:?}", miette::Report::msg(format!("Check task failed: {e}")));
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn exit_code(result: Result<RunResult, CheckError>) -> ExitCode {
    match result {
        Ok(result) => ExitCode::from(result.exit_status()),
        Err(e) => {
            let status = e.exit_status();
            eprintln!("{:?}", miette::Report::new(e));
            ExitCode::from(status)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: CheckArgs,
    }

    fn parse(argv: &[&str]) -> CheckArgs {
        let mut full = vec!["check"];
        full.extend_from_slice(argv);
        Harness::try_parse_from(full).unwrap().args
    }

    #[test]
    fn defaults() {
        let tmp = TempDir::new().unwrap();
        let options = parse(&["Cargo.toml"]).into_options(tmp.path());

        assert_eq!(options.targets, vec!["Cargo.toml".to_string()]);
        assert_eq!(options.style_config, PathBuf::from("stylecheck.json"));
        assert_eq!(options.format, "text");
        assert_eq!(options.exclude, vec!["**/target/**".to_string()]);
        assert!(options.respect_gitignore);
        assert!(!options.errors_only);
    }

    #[test]
    fn zero_targets_parse() {
        let tmp = TempDir::new().unwrap();
        let options = parse(&[]).into_options(tmp.path());
        assert!(options.targets.is_empty());
    }

    #[test]
    fn all_flags() {
        let tmp = TempDir::new().unwrap();
        let options = parse(&[
            "a/Cargo.toml",
            "b",
            "-r",
            "rules.toml",
            "-j",
            "style.json",
            "-f",
            "xml",
            "-e",
            "--exclude",
            "**/gen/**",
            "--no-gitignore",
        ])
        .into_options(tmp.path());

        assert_eq!(options.targets, vec!["a/Cargo.toml", "b"]);
        assert_eq!(options.ruleset, Some(PathBuf::from("rules.toml")));
        assert_eq!(options.style_config, PathBuf::from("style.json"));
        assert_eq!(options.format, "xml");
        assert!(options.errors_only);
        assert_eq!(options.exclude, vec!["**/target/**", "**/gen/**"]);
        assert!(!options.respect_gitignore);
    }

    #[test]
    fn unknown_format_is_left_to_the_pipeline() {
        let args = parse(&["-f", "zzz", "x.rs"]);
        assert_eq!(args.format, "zzz");
    }

    #[test]
    fn project_ruleset_is_picked_up() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("stylecheck.toml"), "").unwrap();

        let options = parse(&["."]).into_options(tmp.path());
        assert_eq!(options.ruleset, Some(tmp.path().join("stylecheck.toml")));
    }

    #[test]
    fn failures_map_to_exit_codes() {
        assert_eq!(
            exit_code(Err(CheckError::Cancelled)),
            ExitCode::from(130)
        );
        assert_eq!(
            exit_code(Ok(RunResult {
                info: 2,
                warning: 1,
                error: 0
            })),
            ExitCode::SUCCESS
        );
        assert_eq!(
            exit_code(Ok(RunResult {
                info: 0,
                warning: 0,
                error: 1
            })),
            ExitCode::from(1)
        );
    }
}
