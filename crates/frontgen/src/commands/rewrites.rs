//! Hosting rewrite generation command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use frontgen_api::{load_descriptors, resolve_backend, RewriteConfig};

use crate::project::Project;

/// Run the rewrites command.
///
/// `backend_url` wins over the configured environment variable.
pub fn run(project: &Project, backend_url: Option<String>, output: Option<PathBuf>) -> Result<()> {
    let settings = &project.config.rewrites;
    let backend = backend_url.or_else(|| std::env::var(&settings.backend_env).ok());
    let backend = resolve_backend(backend.as_deref(), &settings.backend_env)?;

    let api_dir = project.path(&project.config.api.dir);
    let apis = load_descriptors(&api_dir).context("Failed to load API descriptors")?;

    let config = RewriteConfig::build(&apis, &backend);

    let output = project.path(output.unwrap_or_else(|| PathBuf::from(&settings.output)));
    config.write(&output)?;

    tracing::info!(
        "Wrote {} rewrite rules to {}",
        config.rewrites.len(),
        output.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use frontgen_api::{RewriteError, SPA_ENTRY};
    use std::fs;
    use tempfile::tempdir;

    fn project(root: &std::path::Path) -> Project {
        project_with_env(root, "FRONTGEN_TEST_BACKEND_NEVER_SET")
    }

    fn project_with_env(root: &std::path::Path, backend_env: &str) -> Project {
        fs::write(root.join("vite.config.js"), "").unwrap();
        fs::create_dir_all(root.join("src/api")).unwrap();
        fs::write(
            root.join("src/api/login.json"),
            r#"{"url": "/admin/login", "description": "Login"}"#,
        )
        .unwrap();

        let mut config = Config::default();
        config.rewrites.backend_env = backend_env.to_string();
        Project::open(root.to_path_buf(), config).unwrap()
    }

    #[test]
    fn writes_vercel_json() {
        let temp = tempdir().unwrap();
        let project = project(temp.path());

        run(&project, Some("https://api.example.com/".to_string()), None).unwrap();

        let written =
            RewriteConfig::from_json(&fs::read_to_string(temp.path().join("vercel.json")).unwrap())
                .unwrap();
        assert_eq!(written.rewrites.len(), 2);
        assert_eq!(
            written.rewrites[0].destination,
            "https://api.example.com/admin/login"
        );
        assert_eq!(written.rewrites[1].destination, SPA_ENTRY);
    }

    #[test]
    fn missing_backend_writes_nothing() {
        let temp = tempdir().unwrap();
        let project = project(temp.path());

        for backend in [None, Some(String::new())] {
            let err = run(&project, backend, None).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<RewriteError>(),
                Some(RewriteError::MissingBackend(_))
            ));
        }

        assert!(!temp.path().join("vercel.json").exists());
    }

    #[test]
    fn reads_backend_from_configured_env_var() {
        let temp = tempdir().unwrap();
        let project = project_with_env(temp.path(), "FRONTGEN_TEST_BACKEND_FROM_ENV");
        std::env::set_var("FRONTGEN_TEST_BACKEND_FROM_ENV", "https://env.example.com//");

        run(&project, None, None).unwrap();

        let written =
            RewriteConfig::from_json(&fs::read_to_string(temp.path().join("vercel.json")).unwrap())
                .unwrap();
        assert_eq!(
            written.rewrites[0].destination,
            "https://env.example.com/admin/login"
        );
    }

    #[test]
    fn repeated_runs_write_identical_bytes() {
        let temp = tempdir().unwrap();
        let project = project(temp.path());
        fs::write(
            temp.path().join("src/api/rank.json"),
            r#"{"url": "/sport/排名", "description": "Ranking"}"#,
        )
        .unwrap();
        let output = temp.path().join("vercel.json");

        run(&project, Some("https://api.example.com".to_string()), None).unwrap();
        let first = fs::read(&output).unwrap();
        run(&project, Some("https://api.example.com".to_string()), None).unwrap();
        let second = fs::read(&output).unwrap();

        assert_eq!(first, second);
    }
}
