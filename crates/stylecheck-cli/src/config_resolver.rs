//! Ruleset file resolution with global fallback.
//!
//! Resolves the ruleset path using a deterministic priority order:
//!
//! 1. `--ruleset` flag (explicit path, used even if it does not exist)
//! 2. `{cwd}/stylecheck.toml` or `.stylecheck.toml`
//! 3. `~/.stylecheck/ruleset.toml` (global fallback)
//! 4. No ruleset found → default severities

use std::path::{Path, PathBuf};

/// Where the ruleset was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesetSource {
    /// Explicitly specified via `--ruleset`.
    Explicit(PathBuf),
    /// Found in the working directory.
    Project(PathBuf),
    /// Loaded from the global config directory (`~/.stylecheck/`).
    Global(PathBuf),
    /// No ruleset found; default severities will be used.
    Default,
}

impl RulesetSource {
    /// Consumes the source, returning the resolved path.
    #[must_use]
    pub fn into_path(self) -> Option<PathBuf> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }
}

/// Project-level ruleset names, checked in order.
const PROJECT_RULESET_NAMES: &[&str] = &["stylecheck.toml", ".stylecheck.toml"];

/// Ruleset file name within the global config directory.
const GLOBAL_RULESET_NAME: &str = "ruleset.toml";

/// Overrides the global config directory.
const CONFIG_DIR_ENV: &str = "STYLECHECK_CONFIG_DIR";

/// Resolves the ruleset path.
///
/// See module-level docs for resolution order.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> RulesetSource {
    resolve_inner(project_dir, explicit, global_config_dir())
}

/// Testable core: accepts `global_dir` as parameter to avoid env var races.
fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> RulesetSource {
    if let Some(p) = explicit {
        return RulesetSource::Explicit(p.to_path_buf());
    }

    for name in PROJECT_RULESET_NAMES {
        let candidate = project_dir.join(name);
        if candidate.is_file() {
            tracing::debug!("Found project ruleset: {}", candidate.display());
            return RulesetSource::Project(candidate);
        }
    }

    if let Some(dir) = global_dir {
        let candidate = dir.join(GLOBAL_RULESET_NAME);
        if candidate.is_file() {
            tracing::debug!("Found global ruleset: {}", candidate.display());
            return RulesetSource::Global(candidate);
        }
    }

    RulesetSource::Default
}

/// Returns the global config directory path.
///
/// Resolution: `$STYLECHECK_CONFIG_DIR` > `~/.stylecheck/`
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".stylecheck"))
}
