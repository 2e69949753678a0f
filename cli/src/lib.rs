//! Dotfiles deployer.
//!
//! Links the files of a dotfiles repository into the home directory: one
//! symlink per manifest entry, chosen by platform, with existing files backed
//! up rather than overwritten. Running it again changes nothing.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: repository/home resolution and the embedded manifest
//! - **[`resources`]**: idempotent `check + apply` primitives (symlink, chmod, backup)
//! - **[`deploy`]**: the per-entry state machine built on those resources
//! - **[`commands`]**: whole-run orchestration and exit status
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod deploy;
pub mod error;
pub mod exec;
pub mod logging;
pub mod platform;
pub mod resources;

/// Version string: `DOTDEPLOY_VERSION` when stamped at build time, otherwise
/// the crate version with a `dev-` prefix.
pub const VERSION: &str = match option_env!("DOTDEPLOY_VERSION") {
    Some(version) => version,
    None => concat!("dev-", env!("CARGO_PKG_VERSION")),
};
