//! Template scanning for custom-property references.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use walkdir::WalkDir;

// Only bare references match; `var(--a, 1px)` carries a fallback and is skipped.
static VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"var\(([-A-Za-z0-9_]+)\)").expect("Invalid var() regex"));

/// Every variable name referenced in `source`, in order of appearance.
pub fn find_variables(source: &str) -> Vec<&str> {
    VAR_RE
        .captures_iter(source)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Variables discovered during a scan, with the files they came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableIndex {
    /// Variable name to source files, one entry per occurrence
    sources: BTreeMap<String, Vec<PathBuf>>,
}

impl VariableIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every reference in `source` as coming from `path`.
    pub fn record(&mut self, path: &Path, source: &str) -> usize {
        let found = find_variables(source);
        for name in &found {
            self.sources
                .entry((*name).to_string())
                .or_default()
                .push(path.to_path_buf());
        }
        found.len()
    }

    /// Number of distinct variables.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether nothing was found.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Distinct variable names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(|k| k.as_str())
    }

    /// Rewrite every source path relative to `base`. Paths outside `base` are kept as-is.
    pub fn relative_to(self, base: &Path) -> Self {
        let sources = self
            .sources
            .into_iter()
            .map(|(name, paths)| {
                let paths = paths
                    .into_iter()
                    .map(|p| p.strip_prefix(base).map(Path::to_path_buf).unwrap_or(p))
                    .collect();
                (name, paths)
            })
            .collect();

        Self { sources }
    }

    /// Files that reference `name`, in scan order.
    pub fn sources_of(&self, name: &str) -> &[PathBuf] {
        self.sources.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Errors that can occur while scanning.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Source directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("Failed to read {path}: {message}")]
    ReadError { path: String, message: String },
}

/// Recursively scans a source tree for template files.
#[derive(Debug, Clone)]
pub struct VariableScanner {
    /// File extensions treated as templates (without the dot)
    extensions: Vec<String>,
}

impl Default for VariableScanner {
    fn default() -> Self {
        Self::new(["vue"])
    }
}

impl VariableScanner {
    /// Create a scanner for the given template extensions.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    /// Walk `root` and index every variable reference in matching files.
    ///
    /// Files are visited in name order within each directory.
    pub fn scan(&self, root: &Path) -> Result<VariableIndex, ScanError> {
        if !root.is_dir() {
            return Err(ScanError::DirectoryNotFound(root.display().to_string()));
        }

        let mut index = VariableIndex::new();
        let mut files = 0;

        for entry in WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if !path.is_file() || !self.is_template(path) {
                continue;
            }

            let content = fs::read_to_string(path).map_err(|e| ScanError::ReadError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

            let count = index.record(path, &content);
            tracing::debug!("{}: {} references", path.display(), count);
            files += 1;
        }

        tracing::debug!("Scanned {} template files under {}", files, root.display());

        Ok(index)
    }

    fn is_template(&self, path: &Path) -> bool {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        self.extensions.iter().any(|wanted| wanted == ext)
    }
}
