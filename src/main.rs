//! `dotmodules` binary: parse the command line and deploy.
use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use dotmodules::cli::Cli;
use dotmodules::commands;
use dotmodules::logging::{self, Logger};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    let log_file = logging::init_subscriber(args.verbose, "deploy");
    let log = Arc::new(Logger::new(log_file));

    commands::deploy::run(&args.opts, &log)
}
