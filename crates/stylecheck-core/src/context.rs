//! Context types for rule execution.

use crate::settings::StyleSettings;
use std::path::{Path, PathBuf};

/// Context provided to rules for one source document.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Path to the document as resolved.
    pub path: &'a Path,
    /// Document contents.
    pub content: &'a str,
    /// Path relative to the unit root.
    pub relative_path: PathBuf,
    /// Style settings shared by every document of the run.
    pub settings: &'a StyleSettings,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path, settings: &'a StyleSettings) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .ok()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(
                || {
                    path.file_name()
                        .map_or_else(|| path.to_path_buf(), PathBuf::from)
                },
                Path::to_path_buf,
            );

        Self {
            path,
            content,
            relative_path,
            settings,
        }
    }

    /// Iterates over `(line_number, line)` pairs, 1-indexed.
    pub fn numbered_lines(&self) -> impl Iterator<Item = (usize, &'a str)> {
        self.content.lines().enumerate().map(|(i, l)| (i + 1, l))
    }
}
