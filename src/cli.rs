//! Command-line interface definition.
use clap::Parser;
use std::path::PathBuf;

/// Top-level CLI entry point for the module deployer.
#[derive(Parser, Debug)]
#[command(
    name = "dotmodules",
    about = "Deploy dotfile modules into the home directory",
    version
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Deployment options.
    #[command(flatten)]
    pub opts: DeployOpts,
}

/// Options controlling a deployment run.
#[derive(Parser, Debug, Clone, Default)]
pub struct DeployOpts {
    /// Preview changes without applying
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Dotfiles root holding the module directories
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Destination root (defaults to the home directory)
    #[arg(long, value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// Deploy only these modules
    #[arg(short, long, value_delimiter = ',', value_name = "NAME")]
    pub module: Vec<String>,
}
