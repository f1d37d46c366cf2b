//! Reviewed custom-property allow-list.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Set of variable names that have been reviewed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    names: HashSet<String>,
}

/// Errors that can occur when loading the allow-list.
#[derive(Debug, thiserror::Error)]
pub enum AllowListError {
    #[error("Failed to read allow-list {path}: {message}")]
    ReadError { path: String, message: String },
}

impl AllowList {
    /// Parse one name per line. Whitespace around a name is ignored, as are blank lines.
    pub fn parse(source: &str) -> Self {
        let names = source
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        Self { names }
    }

    /// Load and parse an allow-list file.
    pub fn load(path: &Path) -> Result<Self, AllowListError> {
        let content = fs::read_to_string(path).map_err(|e| AllowListError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Ok(Self::parse(&content))
    }

    /// Whether `name` has been reviewed.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of reviewed names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
