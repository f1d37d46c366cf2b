//! Project root detection.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::{Config, DEFAULT_MARKER};

/// Whether `dir` contains the project marker file.
pub fn is_project_root(dir: &Path, marker: &str) -> bool {
    dir.join(marker).is_file()
}

/// Outcome of looking for a project at a directory.
#[derive(Debug)]
pub enum Located {
    Found(Project),
    /// Not a project root; carries the marker that was looked for
    NotRoot(String),
}

/// A verified project root and its configuration.
#[derive(Debug)]
pub struct Project {
    pub root: PathBuf,
    pub config: Config,
}

impl Project {
    /// Accept `root` only if it holds the configured marker.
    pub fn open(root: PathBuf, config: Config) -> Option<Self> {
        if is_project_root(&root, &config.project.marker) {
            Some(Self { root, config })
        } else {
            None
        }
    }

    /// Load `config_file` (relative to `root`) and check the marker.
    ///
    /// A config that fails to load outside a default-marked root reports `NotRoot`
    /// rather than the load error.
    pub fn locate(root: PathBuf, config_file: &Path) -> Result<Located> {
        let config = match Config::load(&root.join(config_file)) {
            Ok(config) => config,
            Err(e) if is_project_root(&root, DEFAULT_MARKER) => return Err(e),
            Err(e) => {
                tracing::debug!("Ignoring config outside project root: {:#}", e);
                return Ok(Located::NotRoot(DEFAULT_MARKER.to_string()));
            }
        };

        let marker = config.project.marker.clone();
        Ok(match Self::open(root, config) {
            Some(project) => Located::Found(project),
            None => Located::NotRoot(marker),
        })
    }

    /// Resolve a project-relative path.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }
}
