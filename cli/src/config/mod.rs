//! Run configuration: repository root, home directory and the manifest.
pub mod manifest;

use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use crate::platform::Platform;

pub use manifest::DotfileEntry;

/// Everything a run needs to know before deploying: where the repository and
/// home directory are, and which dotfiles apply to this platform.
#[derive(Debug, Clone)]
pub struct Config {
    /// Dotfiles repository root.
    pub root: PathBuf,
    /// User home directory.
    pub home: PathBuf,
    /// Detected platform.
    pub platform: Platform,
    /// Dotfiles to deploy, in manifest order.
    pub entries: Vec<DotfileEntry>,
}

impl Config {
    /// Load the manifest for `platform`.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded manifest is malformed.
    pub fn load(root: &Path, home: &Path, platform: Platform) -> Result<Self> {
        let entries = manifest::load(platform)?;
        Ok(Self {
            root: root.to_path_buf(),
            home: home.to_path_buf(),
            platform,
            entries,
        })
    }
}

/// Resolve the dotfiles repository root.
///
/// Uses `DOTFILES_ROOT` when set, made absolute; otherwise looks for a git
/// checkout around the executable (`<root>/deploy/target/<profile>/` or
/// `<root>/bin/`), then the current directory.
///
/// # Errors
///
/// Returns an error if `DOTFILES_ROOT` does not exist or no candidate is
/// found.
pub fn resolve_root() -> Result<PathBuf> {
    if let Ok(root) = std::env::var("DOTFILES_ROOT") {
        return root_from_env(&root);
    }

    if let Ok(exe) = std::env::current_exe()
        && let Some(parent) = exe.parent()
    {
        let candidates = [
            parent.join("../../.."), // deploy/target/release/ → repo root
            parent.join(".."),       // bin/ → repo root
        ];
        for candidate in &candidates {
            if is_repository(candidate) {
                return dunce::canonicalize(candidate)
                    .with_context(|| format!("resolving {}", candidate.display()));
            }
        }
    }

    let cwd = std::env::current_dir().context("reading current directory")?;
    if is_repository(&cwd) {
        return Ok(cwd);
    }

    anyhow::bail!("cannot determine dotfiles root. Set the DOTFILES_ROOT env var");
}

/// Absolute form of a `DOTFILES_ROOT` value. Links are made from these paths,
/// so a relative value must not leak into them.
fn root_from_env(value: &str) -> Result<PathBuf> {
    dunce::canonicalize(value).with_context(|| format!("resolving DOTFILES_ROOT {value}"))
}

/// Resolve the user's home directory from `HOME` (or `USERPROFILE`).
///
/// # Errors
///
/// Returns an error if neither variable is set.
pub fn resolve_home() -> Result<PathBuf> {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map(PathBuf::from)
        .map_err(|_| anyhow::anyhow!("HOME environment variable is not set"))
}

fn is_repository(dir: &Path) -> bool {
    dir.join(".git").exists()
}
