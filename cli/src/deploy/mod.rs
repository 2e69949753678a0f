//! Per-dotfile deployment: bring one destination to "symlink to source".
//!
//! Each entry walks the same sequence of checks:
//!
//! ```text
//! source exists? ── no ──> Failed(SourceMissing)
//!   │
//! parent dir ── missing ──> create (0755)
//!   │
//! compile script? ── yes ──> run it (warn on failure)
//!   │
//! destination state
//!   ├─ correct link ──────> AlreadyDeployed (+ chmod)
//!   ├─ missing ───────────> link (+ chmod)
//!   ├─ broken link ───────> remove, link (+ chmod)
//!   └─ something else ────> back up, link (+ chmod)
//!                            └─ backup refused ──> Skipped(BackupConflict)
//! ```
//!
//! In a dry run every mutation is replaced by a `dry_run` log line while the
//! checks still read the real filesystem, so the result is the one a real run
//! would report.
pub mod compile;
pub mod resolved;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::DotfileEntry;
use crate::error::{CompileWarning, DeployError};
use crate::exec::Executor;
use crate::logging::{EntryStatus, Log};
use crate::resources::backup::BackupResource;
use crate::resources::chmod::ChmodResource;
use crate::resources::symlink::SymlinkResource;
use crate::resources::{Resource, ResourceState, fs};

pub use resolved::ResolvedDotfile;

/// Options that apply to every entry of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeployOptions {
    /// Log intended mutations instead of performing them.
    pub dry_run: bool,
    /// Log every state transition.
    pub verbose: bool,
    /// Mode applied after linking to entries that do not set their own.
    pub permissions: Option<u32>,
}

/// Outcome of deploying one entry.
#[derive(Debug)]
pub enum DeployResult {
    /// A new link was created (or would be, in a dry run).
    Linked {
        /// Where an existing file was moved aside to.
        backup: Option<PathBuf>,
        /// A broken link was removed first.
        replaced_broken: bool,
    },
    /// The destination already was the correct link.
    AlreadyDeployed,
    /// The entry was left untouched.
    Skipped(DeployError),
    /// The entry could not be deployed.
    Failed(DeployError),
}

impl DeployResult {
    /// Summary status for this result.
    #[must_use]
    pub const fn status(&self, dry_run: bool) -> EntryStatus {
        match self {
            Self::Linked { .. } if dry_run => EntryStatus::DryRun,
            Self::Linked { .. } => EntryStatus::Deployed,
            Self::AlreadyDeployed => EntryStatus::AlreadyDeployed,
            Self::Skipped(_) => EntryStatus::Skipped,
            Self::Failed(_) => EntryStatus::Failed,
        }
    }

    /// Detail for the run summary, if there is anything worth saying.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Linked {
                backup: Some(backup),
                ..
            } => Some(format!("backed up to {}", backup.display())),
            Self::Linked {
                replaced_broken: true,
                ..
            } => Some("replaced broken link".to_string()),
            Self::Skipped(e) | Self::Failed(e) => Some(e.to_string()),
            Self::Linked { .. } | Self::AlreadyDeployed => None,
        }
    }

    /// Whether the entry failed.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Deploys manifest entries from a dotfiles repository into a home
/// directory.
pub struct Deployer {
    root: PathBuf,
    home: PathBuf,
    options: DeployOptions,
    executor: Arc<dyn Executor>,
    log: Arc<dyn Log>,
}

impl std::fmt::Debug for Deployer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deployer")
            .field("root", &self.root)
            .field("home", &self.home)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Deployer {
    /// Create a deployer. `executor` runs compile scripts.
    #[must_use]
    pub fn new(
        root: PathBuf,
        home: PathBuf,
        options: DeployOptions,
        executor: Arc<dyn Executor>,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            root,
            home,
            options,
            executor,
            log,
        }
    }

    /// Options this deployer was created with.
    #[must_use]
    pub const fn options(&self) -> &DeployOptions {
        &self.options
    }

    /// Deploy one entry. Errors never escape: they become
    /// [`DeployResult::Skipped`] or [`DeployResult::Failed`] and are logged.
    pub fn deploy(&self, entry: &DotfileEntry) -> DeployResult {
        let dotfile = ResolvedDotfile::resolve(entry, &self.root, &self.home);
        match self.converge(&dotfile) {
            Ok(result) => result,
            Err(e) if e.is_skip() => {
                self.log.warn(&format!("{}: skipped, {e}", dotfile.name));
                DeployResult::Skipped(e)
            }
            Err(e) => {
                self.log.error(&format!("{}: {e}", dotfile.name));
                DeployResult::Failed(e)
            }
        }
    }

    fn converge(&self, dotfile: &ResolvedDotfile) -> Result<DeployResult, DeployError> {
        if !dotfile.source.exists() {
            return Err(DeployError::SourceMissing {
                path: dotfile.source.clone(),
            });
        }

        self.ensure_parent(&dotfile.parent)?;

        if let Some(script) = &dotfile.compile_script {
            self.compile(dotfile, script);
        }

        let link = SymlinkResource::new(dotfile.source.clone(), dotfile.destination.clone());
        let state = link.current_state().map_err(|source| DeployError::Inspect {
            path: dotfile.destination.clone(),
            source,
        })?;
        self.transition(&format!("{}: destination is {state:?}", dotfile.name));

        let mut backup = None;
        let mut replaced_broken = false;
        match state {
            ResourceState::Correct => {
                self.log
                    .debug(&format!("{} already deployed", dotfile.destination.display()));
                self.apply_permissions(dotfile)?;
                return Ok(DeployResult::AlreadyDeployed);
            }
            ResourceState::Missing => {}
            ResourceState::Broken { points_to } => {
                self.remove_broken(&dotfile.destination, &points_to)?;
                replaced_broken = true;
            }
            ResourceState::Incorrect { current } => {
                self.log.info(&format!(
                    "conflict at {}: {current}",
                    dotfile.destination.display()
                ));
                backup = Some(self.back_up(&dotfile.destination)?);
            }
            // the compile script removed the source
            ResourceState::Invalid { .. } => {
                return Err(DeployError::SourceMissing {
                    path: dotfile.source.clone(),
                });
            }
        }

        self.link(&link)?;
        self.apply_permissions(dotfile)?;
        Ok(DeployResult::Linked {
            backup,
            replaced_broken,
        })
    }

    fn transition(&self, msg: &str) {
        if self.options.verbose {
            self.log.debug(msg);
        }
    }

    fn ensure_parent(&self, parent: &Path) -> Result<(), DeployError> {
        if parent.is_dir() {
            return Ok(());
        }

        if self.options.dry_run {
            // the nearest existing ancestor must be a directory for a real
            // run to get past this point
            if let Some(blocker) = parent.ancestors().find(|a| a.exists())
                && !blocker.is_dir()
            {
                return Err(DeployError::DirectoryCreation {
                    path: parent.to_path_buf(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotADirectory,
                        format!("{} is not a directory", blocker.display()),
                    ),
                });
            }
            self.log
                .dry_run(&format!("would create directory {}", parent.display()));
            return Ok(());
        }

        fs::create_dir_all(parent).map_err(|source| DeployError::DirectoryCreation {
            path: parent.to_path_buf(),
            source,
        })?;
        self.transition(&format!("created directory {}", parent.display()));
        Ok(())
    }

    fn compile(&self, dotfile: &ResolvedDotfile, script: &Path) {
        let dir = dotfile.source_dir();
        let outcome = if self.options.dry_run {
            compile::check_script(script).map(|()| {
                self.log.dry_run(&format!(
                    "would run {} in {}",
                    script.display(),
                    dir.display()
                ));
            })
        } else {
            compile::run(self.executor.as_ref(), script, dir).map(|result| {
                self.transition(&format!("compiled {}: {}", dotfile.name, result.stdout.trim()));
            })
        };

        if let Err(warning) = outcome {
            self.warn_compile(dotfile, &warning);
        }
    }

    fn warn_compile(&self, dotfile: &ResolvedDotfile, warning: &CompileWarning) {
        self.log
            .warn(&format!("{}: {warning}, deploying as-is", dotfile.name));
    }

    fn back_up(&self, destination: &Path) -> Result<PathBuf, DeployError> {
        let backup = BackupResource::for_path(destination);
        let conflict = |reason: String| DeployError::BackupConflict {
            path: destination.to_path_buf(),
            reason,
        };

        let state = backup.current_state().map_err(|e| conflict(e.to_string()))?;
        if let ResourceState::Invalid { reason } = state {
            return Err(conflict(reason));
        }

        if self.options.dry_run {
            self.log
                .dry_run(&format!("would back up {}", backup.description()));
        } else {
            backup.apply().map_err(|e| conflict(e.to_string()))?;
            self.log.info(&format!("backed up {}", backup.description()));
        }
        Ok(backup.backup)
    }

    fn remove_broken(&self, destination: &Path, points_to: &Path) -> Result<(), DeployError> {
        if self.options.dry_run {
            self.log.dry_run(&format!(
                "would remove broken link {} -> {}",
                destination.display(),
                points_to.display()
            ));
            return Ok(());
        }

        fs::remove_existing(destination).map_err(|source| DeployError::BrokenLinkRemoval {
            path: destination.to_path_buf(),
            source,
        })?;
        self.transition(&format!(
            "removed broken link {} -> {}",
            destination.display(),
            points_to.display()
        ));
        Ok(())
    }

    fn link(&self, link: &SymlinkResource) -> Result<(), DeployError> {
        if self.options.dry_run {
            self.log.dry_run(&format!("would link {}", link.description()));
            return Ok(());
        }

        link.apply().map_err(|source| DeployError::SymlinkCreation {
            link: link.target.clone(),
            target: link.source.clone(),
            source,
        })?;
        self.log.info(&format!("linked {}", link.description()));
        Ok(())
    }

    fn apply_permissions(&self, dotfile: &ResolvedDotfile) -> Result<(), DeployError> {
        let Some(mode) = dotfile.permissions.or(self.options.permissions) else {
            return Ok(());
        };
        // the link may not exist yet in a dry run; it resolves to the source
        let target = if self.options.dry_run {
            &dotfile.source
        } else {
            &dotfile.destination
        };
        let chmod = ChmodResource::new(target.clone(), mode);
        let permissions_error = |source| DeployError::Permissions {
            path: dotfile.destination.clone(),
            mode,
            source,
        };

        if !chmod.needs_change().map_err(permissions_error)? {
            self.transition(&format!(
                "{} already has mode {mode:o}",
                dotfile.destination.display()
            ));
            return Ok(());
        }

        if self.options.dry_run {
            self.log.dry_run(&format!(
                "would set mode {mode:o} on {}",
                dotfile.destination.display()
            ));
            return Ok(());
        }

        chmod.apply().map_err(permissions_error)?;
        self.log.info(&format!(
            "set mode {mode:o} on {}",
            dotfile.destination.display()
        ));
        Ok(())
    }
}
