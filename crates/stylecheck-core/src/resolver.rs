//! Target resolution: user-supplied paths to analyzable units.
//!
//! A target is one of:
//!
//! - a `Cargo.toml` manifest: one unit per package (`[package]`) and per
//!   workspace member (`[workspace] members`);
//! - a directory: one unit holding every `.rs` file below it;
//! - a `.rs` file: a one-document unit.
//!
//! Resolution is strict: the first target that cannot be classified, read,
//! or that yields no documents fails the whole run.

use crate::types::AnalyzableUnit;
use ignore::WalkBuilder;
use serde::Deserialize;
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Manifest file name recognized as a project target.
pub const MANIFEST_NAME: &str = "Cargo.toml";

/// Extension of analyzable source documents.
pub const SOURCE_EXTENSION: &str = "rs";

/// Errors that can occur while resolving targets.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No targets were supplied.
    #[error("no targets given")]
    NoTargets,

    /// The working directory could not be determined.
    #[error("cannot determine working directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    /// The target is neither an existing file nor a directory.
    #[error("target {0} does not exist")]
    NotFound(PathBuf),

    /// The target is a file that is neither a manifest nor a source document.
    #[error("target {0} is neither a Cargo.toml nor a .rs file")]
    Unsupported(PathBuf),

    /// A manifest could not be read or parsed.
    #[error("invalid manifest {path}: {message}")]
    Manifest {
        /// Manifest path.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// A workspace member or exclude pattern is not a valid glob.
    #[error("invalid pattern `{pattern}`: {source}")]
    Pattern {
        /// The offending pattern.
        pattern: String,
        /// Underlying glob error.
        source: glob::PatternError,
    },

    /// Directory traversal failed.
    #[error("failed to walk {path}: {source}")]
    Walk {
        /// Directory being walked.
        path: PathBuf,
        /// Underlying traversal error.
        source: ignore::Error,
    },

    /// IO error while expanding a target.
    #[error("IO error at {path}: {source}")]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The target resolved to zero source documents.
    #[error("target {0} contains no .rs documents")]
    NoDocuments(PathBuf),
}

/// How a target path is expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// A `Cargo.toml` manifest.
    Manifest,
    /// A directory walked recursively.
    Directory,
    /// A single source document.
    SourceFile,
}

impl TargetKind {
    /// Classifies an absolute target path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not exist or is an unsupported file.
    pub fn classify(path: &Path) -> Result<Self, ResolveError> {
        if path.is_dir() {
            return Ok(Self::Directory);
        }
        if !path.is_file() {
            return Err(ResolveError::NotFound(path.to_path_buf()));
        }
        if path.file_name().is_some_and(|n| n == MANIFEST_NAME) {
            return Ok(Self::Manifest);
        }
        if is_source_document(path) {
            return Ok(Self::SourceFile);
        }
        Err(ResolveError::Unsupported(path.to_path_buf()))
    }
}

/// Options controlling target expansion.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Style-configuration file recorded on every unit.
    pub style_config: PathBuf,
    /// Glob patterns matched against document paths.
    pub exclude: Vec<String>,
    /// Whether `.gitignore` and `.ignore` files are honored.
    pub respect_gitignore: bool,
}

impl ResolveOptions {
    /// Creates options with default excludes and gitignore support.
    #[must_use]
    pub fn new(style_config: impl Into<PathBuf>) -> Self {
        Self {
            style_config: style_config.into(),
            exclude: vec!["**/target/**".to_string()],
            respect_gitignore: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ManifestDto {
    package: Option<toml::Value>,
    workspace: Option<WorkspaceDto>,
}

#[derive(Debug, Default, Deserialize)]
struct WorkspaceDto {
    #[serde(default)]
    members: Vec<String>,
    #[serde(default)]
    exclude: Vec<String>,
}

/// Expands targets into analyzable units.
#[derive(Debug)]
pub struct TargetResolver {
    options: ResolveOptions,
    exclude: Vec<glob::Pattern>,
    base_dir: PathBuf,
}

impl TargetResolver {
    /// Creates a resolver that resolves relative targets against the
    /// process working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if an exclude pattern is invalid or the working
    /// directory cannot be determined.
    pub fn new(options: ResolveOptions) -> Result<Self, ResolveError> {
        let base_dir = std::env::current_dir().map_err(ResolveError::CurrentDir)?;
        Self::with_base_dir(options, base_dir)
    }

    /// Creates a resolver that resolves relative targets against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if an exclude pattern is invalid.
    pub fn with_base_dir(
        options: ResolveOptions,
        base_dir: impl Into<PathBuf>,
    ) -> Result<Self, ResolveError> {
        let exclude = options
            .exclude
            .iter()
            .map(|p| {
                glob::Pattern::new(p).map_err(|source| ResolveError::Pattern {
                    pattern: p.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            options,
            exclude,
            base_dir: base_dir.into(),
        })
    }

    /// Resolves every target, in order, into units with unique roots.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty target list or for the first target
    /// that cannot be resolved or yields no documents.
    pub fn resolve<S: AsRef<str>>(&self, targets: &[S]) -> Result<Vec<AnalyzableUnit>, ResolveError> {
        if targets.is_empty() {
            return Err(ResolveError::NoTargets);
        }

        let mut seen_roots = HashSet::new();
        let mut units = Vec::new();

        for target in targets {
            let path = self.absolutize(target.as_ref());
            let kind = TargetKind::classify(&path)?;
            debug!("Resolving {} as {:?}", path.display(), kind);

            let resolved = match kind {
                TargetKind::Manifest => self.resolve_manifest(&path)?,
                TargetKind::Directory => self.directory_unit(&path)?.into_iter().collect(),
                TargetKind::SourceFile => vec![self.unit(path.clone(), vec![path.clone()])],
            };

            if resolved.is_empty() {
                return Err(ResolveError::NoDocuments(path));
            }

            for unit in resolved {
                if seen_roots.insert(unit.root().to_path_buf()) {
                    units.push(unit);
                } else {
                    debug!("Skipping duplicate unit {}", unit.root().display());
                }
            }
        }

        info!(
            "Resolved {} unit(s) with {} document(s)",
            units.len(),
            units.iter().map(|u| u.documents().len()).sum::<usize>()
        );

        Ok(units)
    }

    fn absolutize(&self, target: &str) -> PathBuf {
        // `components()` drops interior `.` segments
        self.base_dir.join(target).components().collect()
    }

    fn unit(&self, root: PathBuf, documents: Vec<PathBuf>) -> AnalyzableUnit {
        AnalyzableUnit::new(root, self.options.style_config.clone(), documents)
    }

    fn directory_unit(&self, dir: &Path) -> Result<Option<AnalyzableUnit>, ResolveError> {
        let documents = self.collect_documents(dir, false)?;
        Ok((!documents.is_empty()).then(|| self.unit(dir.to_path_buf(), documents)))
    }

    fn package_unit(&self, dir: &Path) -> Result<Option<AnalyzableUnit>, ResolveError> {
        let documents = self.collect_documents(dir, true)?;
        if documents.is_empty() {
            debug!("Package {} has no documents, skipping", dir.display());
        }
        Ok((!documents.is_empty()).then(|| self.unit(dir.to_path_buf(), documents)))
    }

    fn resolve_manifest(&self, manifest: &Path) -> Result<Vec<AnalyzableUnit>, ResolveError> {
        let dto = read_manifest(manifest)?;
        let dir = manifest.parent().unwrap_or(Path::new("/"));

        if dto.package.is_none() && dto.workspace.is_none() {
            return Err(ResolveError::Manifest {
                path: manifest.to_path_buf(),
                message: "declares neither [package] nor [workspace]".to_string(),
            });
        }

        let mut units = Vec::new();
        if dto.package.is_some() {
            units.extend(self.package_unit(dir)?);
        }

        if let Some(workspace) = dto.workspace {
            for member in self.workspace_members(dir, &workspace)? {
                let member_manifest = member.join(MANIFEST_NAME);
                if !member_manifest.is_file() {
                    debug!("Workspace member {} has no manifest", member.display());
                    continue;
                }
                let member_dto = read_manifest(&member_manifest)?;
                if member_dto.package.is_some() {
                    units.extend(self.package_unit(&member)?);
                }
            }
        }

        Ok(units)
    }

    fn workspace_members(
        &self,
        dir: &Path,
        workspace: &WorkspaceDto,
    ) -> Result<BTreeSet<PathBuf>, ResolveError> {
        let excluded: BTreeSet<PathBuf> = workspace
            .exclude
            .iter()
            .map(|e| dir.join(e).components().collect())
            .collect();

        let mut members = BTreeSet::new();
        for pattern in &workspace.members {
            let escaped = glob::Pattern::escape(&dir.to_string_lossy());
            let full = Path::new(&escaped).join(pattern).to_string_lossy().into_owned();
            let paths = glob::glob(&full).map_err(|source| ResolveError::Pattern {
                pattern: pattern.clone(),
                source,
            })?;
            for entry in paths {
                let path = entry.map_err(|e| ResolveError::Io {
                    path: e.path().to_path_buf(),
                    source: e.into(),
                })?;
                let path: PathBuf = path.components().collect();
                if path.is_dir() && !excluded.contains(&path) {
                    members.insert(path);
                }
            }
        }

        Ok(members)
    }

    fn collect_documents(
        &self,
        root: &Path,
        skip_nested_packages: bool,
    ) -> Result<Vec<PathBuf>, ResolveError> {
        let respect = self.options.respect_gitignore;
        let mut builder = WalkBuilder::new(root);
        builder
            .git_ignore(respect)
            .git_global(respect)
            .git_exclude(respect)
            .ignore(respect)
            .parents(respect)
            .require_git(false);

        if skip_nested_packages {
            builder.filter_entry(|entry| {
                let nested = entry.depth() > 0
                    && entry.file_type().is_some_and(|t| t.is_dir())
                    && entry.path().join(MANIFEST_NAME).is_file();
                !nested
            });
        }

        let mut documents = Vec::new();
        for entry in builder.build() {
            let entry = entry.map_err(|source| ResolveError::Walk {
                path: root.to_path_buf(),
                source,
            })?;
            let path = entry.path();

            if !entry.file_type().is_some_and(|t| t.is_file()) || !is_source_document(path) {
                continue;
            }
            let relative = path.strip_prefix(root).unwrap_or(path);
            if self.should_exclude(relative) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            documents.push(path.to_path_buf());
        }

        Ok(documents)
    }

    /// Checks a document path, relative to its unit root, against the
    /// exclude patterns.
    fn should_exclude(&self, relative: &Path) -> bool {
        self.exclude
            .iter()
            .any(|pattern| pattern.matches_path(relative))
    }
}

fn is_source_document(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == SOURCE_EXTENSION)
}

fn read_manifest(path: &Path) -> Result<ManifestDto, ResolveError> {
    let content = std::fs::read_to_string(path).map_err(|e| ResolveError::Manifest {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    toml::from_str(&content).map_err(|e| ResolveError::Manifest {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
