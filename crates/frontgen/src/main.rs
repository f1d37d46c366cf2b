//! frontgen CLI - build-time helpers for the front-end project.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;
mod project;

use project::{Located, Project};

#[derive(Parser)]
#[command(name = "frontgen")]
#[command(about = "Build-time helpers: API reference, hosting rewrites, CSS variable audit")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to frontgen.toml, relative to the project root
    #[arg(short, long, default_value = "frontgen.toml")]
    config: PathBuf,

    /// Project root (defaults to the current directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the Markdown API reference from the descriptors
    Docs {
        /// Output file (defaults to config or "dist/api.auto.md")
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate hosting rewrite rules that proxy every endpoint to the backend
    Rewrites {
        /// Backend origin (defaults to the BACKEND_URL environment variable)
        #[arg(short, long)]
        backend_url: Option<String>,

        /// Output file (defaults to config or "vercel.json")
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check CSS variables used in templates against the reviewed list
    AuditCss,

    /// Serve the descriptors' example payloads as a mock backend
    Mock {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries reports
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };

    let project = match Project::locate(root, &cli.config)? {
        Located::Found(project) => project,
        Located::NotRoot(marker) => {
            println!(
                "Run frontgen from the project root (the directory containing {})",
                marker
            );
            return Ok(ExitCode::FAILURE);
        }
    };

    match cli.command {
        Commands::Docs { output } => {
            commands::docs::run(&project, output)?;
        }
        Commands::Rewrites {
            backend_url,
            output,
        } => {
            commands::rewrites::run(&project, backend_url, output)?;
        }
        Commands::AuditCss => {
            return commands::audit::run(&project);
        }
        Commands::Mock { port, host } => {
            commands::mock::run(&project, host, port).await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
