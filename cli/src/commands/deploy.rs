//! The `dotdeploy` command: deploy the manifest for this machine.
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::cli::Cli;
use crate::config::{self, Config};
use crate::deploy::{DeployOptions, Deployer};
use crate::exec::{Executor, SystemExecutor};
use crate::logging::Logger;
use crate::platform::Platform;

/// Run a deployment on this machine, already detected as `platform`.
///
/// # Errors
///
/// Returns an error if the dotfiles root or home directory cannot be
/// determined, or any dotfile fails to deploy.
pub fn run(cli: &Cli, platform: Platform, log: &Arc<Logger>) -> Result<()> {
    log.info(&format!("dotdeploy {}", crate::VERSION));

    let root = config::resolve_root()?;
    let home = config::resolve_home()?;

    execute(
        platform,
        &root,
        &home,
        options_from(cli),
        Arc::new(SystemExecutor),
        log,
    )
}

/// Run a deployment for an explicit OS identifier, repository and home.
///
/// # Errors
///
/// Returns an error if `identifier` is not a supported platform or any
/// dotfile fails to deploy.
pub fn run_with(
    identifier: &str,
    root: &Path,
    home: &Path,
    options: DeployOptions,
    executor: Arc<dyn Executor>,
    log: &Arc<Logger>,
) -> Result<()> {
    let platform = Platform::from_identifier(identifier)?;
    execute(platform, root, home, options, executor, log)
}

/// Deployment options selected by the command-line flags.
#[must_use]
pub const fn options_from(cli: &Cli) -> DeployOptions {
    DeployOptions {
        dry_run: cli.dry_run,
        verbose: cli.verbose,
        permissions: None,
    }
}

fn execute(
    platform: Platform,
    root: &Path,
    home: &Path,
    options: DeployOptions,
    executor: Arc<dyn Executor>,
    log: &Arc<Logger>,
) -> Result<()> {
    log.info(&format!("platform: {platform}"));
    if options.dry_run {
        log.info("dry run: no changes will be made");
    }

    let config = Config::load(root, home, platform)?;
    log.debug(&format!(
        "manifest sections: common, {}",
        platform.manifest_section()
    ));
    log.debug(&format!("root: {}", config.root.display()));
    log.debug(&format!("home: {}", config.home.display()));
    log.info(&format!("{} dotfiles for {platform}", config.entries.len()));

    let deployer = Deployer::new(
        config.root.clone(),
        config.home.clone(),
        options,
        executor,
        log.clone(),
    );
    super::deploy_to_completion(&deployer, &config.entries, log)
}
