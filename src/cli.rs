use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ghrel", version, about = "Cut a GitHub release for a version tag")]
pub struct Cli {
    /// Enable debug logging on stderr.
    #[arg(long, global = true)]
    pub debug: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Read the version from a version file and create a release for `v<version>`.
    FromFile(FromFileArgs),
    /// Create a release for the given version tag.
    Create(CreateArgs),
}

#[derive(Debug, Args, Clone)]
pub struct ReleaseOptions {
    /// Path to a config file. Defaults to ghrel.toml, then .ghrel.toml in current directory.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Fail instead of warning when the version format is invalid.
    #[arg(long)]
    pub strict: bool,
    /// Print the release command without running it.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args, Clone)]
pub struct FromFileArgs {
    /// Version file to read. Overrides `version_file` from config.
    #[arg(long)]
    pub file: Option<PathBuf>,
    #[command(flatten)]
    pub options: ReleaseOptions,
}

#[derive(Debug, Args, Clone)]
pub struct CreateArgs {
    /// Version tag to release, for example `v1.2.3`.
    pub version: Option<String>,
    #[command(flatten)]
    pub options: ReleaseOptions,
}
