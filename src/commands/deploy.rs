//! The deploy command: set up every selected module.
use anyhow::{Context as _, Result};
use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::DeployOpts;
use crate::context::{self, Context};
use crate::error::ConfigError;
use crate::logging::{Log, Logger, ModuleStatus};
use crate::modules::Module;
use crate::resources::fs;

/// Run the deploy command.
///
/// # Errors
///
/// Returns an error if the root or destination cannot be resolved, a module
/// name is unknown, or any module fails to set up. The first failing module
/// aborts the run.
pub fn run(opts: &DeployOpts, log: &Arc<Logger>) -> Result<()> {
    let version = option_env!("DOTMODULES_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.info(&format!("dotmodules {version}"));

    let root = resolve_root(opts)?;
    let dest = resolve_dest(opts)?;
    let modules = select_modules(&opts.module)?;
    log.debug(&format!("root: {}", root.display()));
    log.debug(&format!("dest: {}", dest.display()));
    if opts.dry_run {
        log.warn("dry run: no changes will be made");
    }

    let ctx = Context::new(root, dest, Arc::clone(log) as Arc<dyn Log>, opts.dry_run);
    let result = deploy_modules(&ctx, &modules);
    log.print_summary();
    result
}

/// Set up `modules` in order, logging and recording each one.
///
/// # Errors
///
/// Returns the first module error, after recording it as failed.
pub fn deploy_modules(ctx: &Context, modules: &[Module]) -> Result<()> {
    for &module in modules {
        ctx.log.stage(&format!("Deploying {}", module.name()));
        match module.setup(ctx) {
            Ok(stats) => {
                ctx.log.info(&format!(
                    "{} -> {}",
                    module.name(),
                    module.relative_path().display()
                ));
                let status = if ctx.dry_run {
                    ModuleStatus::DryRun
                } else {
                    ModuleStatus::Ok
                };
                ctx.log
                    .record_module(module.name(), status, Some(&stats.summary(ctx.dry_run)));
            }
            Err(e) => {
                ctx.log.error(&format!("{}: {e:#}", module.name()));
                ctx.log
                    .record_module(module.name(), ModuleStatus::Failed, Some(&e.to_string()));
                return Err(e).with_context(|| format!("module {} failed", module.name()));
            }
        }
    }
    Ok(())
}

/// Resolve the dotfiles root: `--root`, then `DOTFILES_ROOT`, then the
/// current directory. The result is absolute.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined.
pub fn resolve_root(opts: &DeployOpts) -> Result<PathBuf> {
    let root = match (&opts.root, std::env::var_os("DOTFILES_ROOT")) {
        (Some(root), _) => root.clone(),
        (None, Some(env_root)) => PathBuf::from(env_root),
        (None, None) => std::env::current_dir().context("reading current directory")?,
    };
    fs::absolute(&root)
}

/// Resolve the destination root: `--dest`, then the home directory. The
/// result is absolute.
///
/// # Errors
///
/// Returns [`ConfigError::HomeNotSet`] if no destination was given and the
/// home directory is unknown.
pub fn resolve_dest(opts: &DeployOpts) -> Result<PathBuf> {
    let dest = match &opts.dest {
        Some(dest) => dest.clone(),
        None => context::home_dir()?,
    };
    fs::absolute(&dest)
}

/// Select modules by name, in deployment order. An empty list selects all.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownModule`] for a name that matches no module.
pub fn select_modules(names: &[String]) -> Result<Vec<Module>, ConfigError> {
    if names.is_empty() {
        return Ok(Module::ALL.to_vec());
    }
    let requested = names
        .iter()
        .map(|n| n.parse::<Module>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Module::ALL
        .into_iter()
        .filter(|m| requested.contains(m))
        .collect())
}
