//! Hosting rewrite rules (`vercel.json`).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::descriptor::ApiDescriptor;

/// Source pattern of the single-page-app fallback rule.
pub const SPA_FALLBACK_SOURCE: &str = "/(.*)";

/// Entry point every unmatched path is rewritten to.
pub const SPA_ENTRY: &str = "/index.html";

/// A single source-to-destination rewrite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RewriteRule {
    pub source: String,
    pub destination: String,
}

/// The generated configuration document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RewriteConfig {
    pub rewrites: Vec<RewriteRule>,
}

/// Errors that can occur while generating rewrites.
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    #[error("Backend URL is not set (export {0} or pass --backend-url)")]
    MissingBackend(String),

    #[error("Failed to serialize rewrites: {0}")]
    Serialize(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Strip every trailing `/` from a backend origin.
pub fn normalize_backend(url: &str) -> &str {
    url.trim_end_matches('/')
}

/// Validate and normalize a backend origin.
///
/// Unset, empty, or slash-only values are rejected; `backend_env` names the variable in
/// the error.
pub fn resolve_backend(backend: Option<&str>, backend_env: &str) -> Result<String, RewriteError> {
    backend
        .map(normalize_backend)
        .filter(|b| !b.is_empty())
        .map(str::to_string)
        .ok_or_else(|| RewriteError::MissingBackend(backend_env.to_string()))
}

impl RewriteConfig {
    /// Build one rule per descriptor, in the given order, followed by the SPA fallback.
    ///
    /// `backend` is expected to come from [`resolve_backend`].
    pub fn build(apis: &[ApiDescriptor], backend: &str) -> Self {
        let mut rewrites: Vec<RewriteRule> = apis
            .iter()
            .map(|api| RewriteRule {
                source: api.url.clone(),
                destination: format!("{}{}", backend, api.url),
            })
            .collect();

        rewrites.push(RewriteRule {
            source: SPA_FALLBACK_SOURCE.to_string(),
            destination: SPA_ENTRY.to_string(),
        });

        Self { rewrites }
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json(&self) -> Result<String, RewriteError> {
        serde_json::to_string_pretty(self).map_err(|e| RewriteError::Serialize(e.to_string()))
    }

    /// Parse a previously generated document.
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    /// Write the document to `path`, replacing any previous file.
    pub fn write(&self, path: &Path) -> Result<(), RewriteError> {
        let json = self.to_json()?;
        fs::write(path, json)
            .map_err(|e| RewriteError::WriteError(format!("{}: {}", path.display(), e)))
    }
}
