//! CLI routing and command dispatch.

use crate::core::manifest;
use crate::core::paths::ProjectPaths;
use crate::models::manifest::ManifestFile;
use crate::models::options::parse_mode;
use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub mod configure;
pub mod init;
pub mod list;
pub mod plan;
pub mod verify;

/// Shared context passed to all command handlers.
pub struct CliContext {
    pub paths: ProjectPaths,
    pub mode_override: Option<u32>,
    pub verbose: bool,
}

impl CliContext {
    /// Read the manifest and apply the `--mode` override.
    pub fn load_manifest(&self) -> Result<ManifestFile> {
        if !self.paths.manifest.is_file() {
            bail!(
                "manifest not found: {} (run: permfix init)",
                self.paths.manifest.display()
            );
        }
        let mut manifest = manifest::load(&self.paths.manifest)?;
        if let Some(mode) = self.mode_override {
            manifest.options.mode = mode;
        }
        Ok(manifest)
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "permfix",
    version,
    about = "Create the directories and files installed modules need and fix their permissions"
)]
pub struct Cli {
    /// Project root (defaults to the nearest directory holding permissions.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub root: Option<PathBuf>,

    /// Manifest location (defaults to <root>/permissions.toml)
    #[arg(long, global = true, value_name = "PATH", env = "PERMFIX_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Permission mode overriding the manifest, in octal
    #[arg(long, global = true, value_name = "OCTAL", env = "PERMFIX_MODE", value_parser = parse_mode)]
    pub mode: Option<u32>,

    /// Record successful operations too and log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let paths = ProjectPaths::resolve(self.root, self.manifest)?;
        tracing::debug!(%paths, manifest = %paths.manifest.display(), "resolved project");

        let ctx = CliContext {
            paths,
            mode_override: self.mode,
            verbose: self.verbose,
        };

        match self.command {
            Commands::Init(args) => init::run(&ctx, args),
            Commands::Configure(args) => configure::run(&ctx, args),
            Commands::Plan(args) => plan::run(&ctx, args),
            Commands::Verify(args) => verify::run(&ctx, args),
            Commands::List(args) => list::run(&ctx, args),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a starter permissions.toml
    Init(init::InitArgs),
    /// Create required paths and apply modes (best-effort)
    Configure(configure::ConfigureArgs),
    /// Dry-run preview of the operations configure would perform
    Plan(plan::PlanArgs),
    /// Check that required paths exist with the expected modes
    Verify(verify::VerifyArgs),
    /// List modules and what they declare
    List(list::ListArgs),
}

/// Install the global tracing subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_tracing(verbose: bool) -> Result<()> {
    let default = if verbose { "permfix=debug" } else { "permfix=error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("init tracing: {}", e))
}
