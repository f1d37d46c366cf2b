//! Project configuration (frontgen.toml).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Marker used when no configuration names one.
pub const DEFAULT_MARKER: &str = "vite.config.js";

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub docs: DocsConfig,
    #[serde(default)]
    pub rewrites: RewritesConfig,
    #[serde(default)]
    pub css: CssConfig,
    #[serde(default)]
    pub mock: MockConfig,
}

#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
    /// File whose presence identifies the project root
    #[serde(default = "default_marker")]
    pub marker: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    /// Directory holding the descriptor JSON files
    #[serde(default = "default_api_dir")]
    pub dir: String,
    /// URL prefixes, highest priority first
    #[serde(default = "default_priority")]
    pub priority: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct DocsConfig {
    #[serde(default = "default_docs_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_docs_file_name")]
    pub file_name: String,
    #[serde(default = "default_docs_title")]
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct RewritesConfig {
    #[serde(default = "default_rewrites_output")]
    pub output: String,
    /// Environment variable holding the backend origin
    #[serde(default = "default_backend_env")]
    pub backend_env: String,
}

#[derive(Debug, Deserialize)]
pub struct CssConfig {
    #[serde(default = "default_css_src")]
    pub src: String,
    #[serde(default = "default_css_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_css_allowlist")]
    pub allowlist: String,
}

#[derive(Debug, Deserialize)]
pub struct MockConfig {
    #[serde(default = "default_mock_host")]
    pub host: String,
    #[serde(default = "default_mock_port")]
    pub port: u16,
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}
fn default_api_dir() -> String {
    "src/api".to_string()
}
fn default_priority() -> Vec<String> {
    frontgen_api::PriorityTable::default().prefixes().to_vec()
}
fn default_docs_output_dir() -> String {
    "dist".to_string()
}
fn default_docs_file_name() -> String {
    "api.auto.md".to_string()
}
fn default_docs_title() -> String {
    "API Reference (auto-generated)".to_string()
}
fn default_rewrites_output() -> String {
    "vercel.json".to_string()
}
fn default_backend_env() -> String {
    "BACKEND_URL".to_string()
}
fn default_css_src() -> String {
    "src".to_string()
}
fn default_css_extensions() -> Vec<String> {
    vec!["vue".to_string()]
}
fn default_css_allowlist() -> String {
    "src/styles/checked_css_variables.txt".to_string()
}
fn default_mock_host() -> String {
    "127.0.0.1".to_string()
}
fn default_mock_port() -> u16 {
    5174
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            marker: default_marker(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            dir: default_api_dir(),
            priority: default_priority(),
        }
    }
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_docs_output_dir(),
            file_name: default_docs_file_name(),
            title: default_docs_title(),
        }
    }
}

impl Default for RewritesConfig {
    fn default() -> Self {
        Self {
            output: default_rewrites_output(),
            backend_env: default_backend_env(),
        }
    }
}

impl Default for CssConfig {
    fn default() -> Self {
        Self {
            src: default_css_src(),
            extensions: default_css_extensions(),
            allowlist: default_css_allowlist(),
        }
    }
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            host: default_mock_host(),
            port: default_mock_port(),
        }
    }
}

impl Config {
    /// Load configuration from `path` if it exists.
    /// Returns an error if the file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());

        Ok(config)
    }
}
