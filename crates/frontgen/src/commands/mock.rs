//! Mock API server command.

use anyhow::{Context, Result};
use frontgen_api::load_descriptors;
use frontgen_server::{MockApi, MockServer, MockServerConfig};

use crate::project::Project;

/// Run the mock server. CLI values override the configured host and port.
pub async fn run(project: &Project, host: Option<String>, port: Option<u16>) -> Result<()> {
    let api_dir = project.path(&project.config.api.dir);
    let apis = load_descriptors(&api_dir).context("Failed to load API descriptors")?;

    let config = MockServerConfig {
        host: host.unwrap_or_else(|| project.config.mock.host.clone()),
        port: port.unwrap_or(project.config.mock.port),
    };

    MockServer::new(config, MockApi::new(apis)).start().await?;

    Ok(())
}
