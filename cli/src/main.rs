//! `dotdeploy` binary: links a dotfiles repository into `$HOME`.
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Parser;

use dotdeploy_cli::platform::Platform;
use dotdeploy_cli::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();

    // an unsupported system is rejected before anything, the log file
    // included, is written
    let platform = Platform::detect()?;

    // a dry run leaves the cache directory alone too
    let log_file = (!args.dry_run).then(|| logging::log_file_path("deploy"));
    let log_file = logging::init_subscriber(args.verbose, log_file.as_deref());

    // nothing is rolled back: entries already linked stay linked
    ctrlc::set_handler(|| {
        tracing::error!("interrupted");
        std::process::exit(1);
    })
    .context("installing interrupt handler")?;

    let log = Arc::new(logging::Logger::new(log_file));
    commands::deploy::run(&args, platform, &log)
}
