//! Domain-specific error types for dotfile deployment.
//!
//! Internal modules return these typed errors; the command handler at the CLI
//! boundary converts them to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! PlatformError   : unsupported OS identifier, fatal for the whole run
//! DeployError     : per-entry failure (or skip, for backup conflicts)
//! CompileWarning  : compile hook problems, never fatal
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise from platform detection.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The operating system identifier is not one of the supported platforms.
    #[error("Unsupported platform: {identifier}")]
    Unsupported {
        /// The identifier reported by the system (e.g. `"SunOS"`).
        identifier: String,
    },
}

/// Errors that stop a single dotfile from being deployed.
///
/// None of these abort the run: the deployer turns them into a skipped or
/// failed entry and moves on to the next one.
#[derive(Error, Debug)]
pub enum DeployError {
    /// The source file is absent from the dotfiles repository.
    #[error("source does not exist: {}", path.display())]
    SourceMissing {
        /// Absolute path of the missing source.
        path: PathBuf,
    },

    /// The destination's parent directory could not be created.
    #[error("cannot create directory {}: {source}", path.display())]
    DirectoryCreation {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The destination is in the way and could not be backed up.
    #[error("cannot back up {}: {reason}", path.display())]
    BackupConflict {
        /// Destination that was left untouched.
        path: PathBuf,
        /// Human-readable reason the backup was refused.
        reason: String,
    },

    /// The operating system refused to create the symlink.
    #[error("cannot create symlink {} -> {}: {source}", link.display(), target.display())]
    SymlinkCreation {
        /// Where the link was to be created.
        link: PathBuf,
        /// What the link was to point at.
        target: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A broken symlink at the destination could not be removed.
    #[error("cannot remove broken symlink {}: {source}", path.display())]
    BrokenLinkRemoval {
        /// The broken link.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The destination could not be inspected (e.g. permission denied on a
    /// parent directory).
    #[error("cannot inspect {}: {source}", path.display())]
    Inspect {
        /// Path whose metadata could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Applying the configured file mode failed.
    #[error("cannot set mode {mode:o} on {}: {source}", path.display())]
    Permissions {
        /// File whose mode could not be changed.
        path: PathBuf,
        /// Requested mode bits.
        mode: u32,
        /// Underlying I/O error.
        source: io::Error,
    },
}

impl DeployError {
    /// Whether this error only skips the entry instead of failing it.
    #[must_use]
    pub const fn is_skip(&self) -> bool {
        matches!(self, Self::BackupConflict { .. })
    }
}

/// Problems with a compile hook. Logged as warnings; deployment proceeds.
#[derive(Error, Debug)]
pub enum CompileWarning {
    /// The configured compile script is not present next to the source.
    #[error("compile script {} does not exist", path.display())]
    MissingScript {
        /// Absolute path where the script was expected.
        path: PathBuf,
    },

    /// The compile script could not be run or exited non-zero.
    #[error("compile script {} failed: {reason}", path.display())]
    Failed {
        /// Absolute path of the script.
        path: PathBuf,
        /// Exit status or spawn error.
        reason: String,
    },
}
