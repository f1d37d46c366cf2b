//! API reference generation command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use frontgen_api::{load_descriptors, DocBuilder, DocConfig, PriorityTable};

use crate::project::Project;

/// Build the doc configuration, letting `output` override the configured location.
fn doc_config(project: &Project, output: Option<PathBuf>) -> DocConfig {
    let docs = &project.config.docs;

    let (output_dir, file_name) = match output {
        Some(path) => {
            let path = project.path(path);
            let file_name = path
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or(docs.file_name.as_str())
                .to_string();
            let dir = path
                .parent()
                .map(PathBuf::from)
                .unwrap_or_else(|| project.root.clone());
            (dir, file_name)
        }
        None => (project.path(&docs.output_dir), docs.file_name.clone()),
    };

    DocConfig {
        output_dir,
        file_name,
        title: docs.title.clone(),
        priority: PriorityTable::new(project.config.api.priority.iter().cloned()),
    }
}

/// Run the docs command.
pub fn run(project: &Project, output: Option<PathBuf>) -> Result<()> {
    let api_dir = project.path(&project.config.api.dir);
    let apis = load_descriptors(&api_dir).context("Failed to load API descriptors")?;

    tracing::info!("Loaded {} descriptors from {}", apis.len(), api_dir.display());

    let result = DocBuilder::new(doc_config(project, output))
        .build(&apis)
        .context("Failed to build API reference")?;

    tracing::info!(
        "Documented {} endpoints in {} groups",
        result.endpoints,
        result.groups
    );
    tracing::info!("Output: {}", result.output_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::fs;
    use tempfile::tempdir;

    fn project(root: &std::path::Path) -> Project {
        fs::write(root.join("vite.config.js"), "").unwrap();
        fs::create_dir_all(root.join("src/api")).unwrap();
        fs::write(
            root.join("src/api/admin.json"),
            r#"{"url": "/admin/list", "description": "List admins", "method": ["GET"]}"#,
        )
        .unwrap();
        fs::write(
            root.join("src/api/player.json"),
            r#"{"url": "/player/info", "description": "Player info", "method": ["GET"]}"#,
        )
        .unwrap();
        Project::open(root.to_path_buf(), Config::default()).unwrap()
    }

    #[test]
    fn writes_reference_under_dist() {
        let temp = tempdir().unwrap();
        let project = project(temp.path());

        run(&project, None).unwrap();

        let markdown = fs::read_to_string(temp.path().join("dist/api.auto.md")).unwrap();
        let player = markdown.find("/player/info").unwrap();
        let admin = markdown.find("/admin/list").unwrap();
        assert!(player < admin);
    }

    #[test]
    fn output_flag_overrides_location() {
        let temp = tempdir().unwrap();
        let project = project(temp.path());

        run(&project, Some(PathBuf::from("docs/api.md"))).unwrap();

        assert!(temp.path().join("docs/api.md").exists());
        assert!(!temp.path().join("dist").exists());
    }

    #[test]
    fn malformed_descriptor_fails() {
        let temp = tempdir().unwrap();
        let project = project(temp.path());
        fs::write(temp.path().join("src/api/broken.json"), "{").unwrap();

        assert!(run(&project, None).is_err());
        assert!(!temp.path().join("dist").exists());
    }
}
