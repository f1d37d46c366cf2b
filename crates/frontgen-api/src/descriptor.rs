//! API descriptor model and loader.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One backend endpoint, as described by a single JSON file.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ApiDescriptor {
    /// Request path (e.g. `/player/info`)
    pub url: String,

    /// Human-readable summary
    pub description: String,

    /// Accepted HTTP verbs, in declaration order
    #[serde(default)]
    pub method: Vec<String>,

    /// Parameter name to description
    #[serde(default)]
    pub params: Map<String, Value>,

    /// Example success body
    #[serde(default)]
    pub response: Value,

    /// Example failure body
    #[serde(default)]
    pub fail: Value,
}

impl ApiDescriptor {
    /// Parse a descriptor from JSON text.
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    /// Whether the descriptor accepts `method`.
    ///
    /// Verbs compare exactly. An empty method list accepts everything.
    pub fn allows(&self, method: &str) -> bool {
        self.method.is_empty() || self.method.iter().any(|m| m == method)
    }
}

/// Errors that can occur while loading descriptors.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    #[error("Failed to read descriptor directory {path}: {message}")]
    ReadDir { path: String, message: String },

    #[error("Failed to read descriptor {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse descriptor {path}: {message}")]
    Parse { path: String, message: String },
}

/// Load every `*.json` file directly inside `dir`.
///
/// Files are read in file-name order so repeated runs see the same sequence.
/// Any unreadable or malformed file aborts the load.
pub fn load_descriptors(dir: &Path) -> Result<Vec<ApiDescriptor>, DescriptorError> {
    let entries = fs::read_dir(dir).map_err(|e| DescriptorError::ReadDir {
        path: dir.display().to_string(),
        message: e.to_string(),
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DescriptorError::ReadDir {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext != "json" {
            continue;
        }

        paths.push(path);
    }

    paths.sort();

    let mut descriptors = Vec::with_capacity(paths.len());
    for path in paths {
        let content = fs::read_to_string(&path).map_err(|e| DescriptorError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let descriptor = ApiDescriptor::from_json(&content).map_err(|e| DescriptorError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        tracing::debug!("Loaded {} from {}", descriptor.url, path.display());
        descriptors.push(descriptor);
    }

    Ok(descriptors)
}
