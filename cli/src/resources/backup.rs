//! Backup of an ordinary file that is in the way of a dotfile link.
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use super::{Resource, ResourceState};

/// Suffix appended to the file name of a backed-up destination.
pub const BACKUP_SUFFIX: &str = ".backup";

/// Path a file is moved to when backed up: `<path>.backup`.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use dotdeploy_cli::resources::backup::backup_path;
///
/// assert_eq!(
///     backup_path(Path::new("/home/user/.vimrc")),
///     PathBuf::from("/home/user/.vimrc.backup"),
/// );
/// ```
#[must_use]
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(OsString::new, std::ffi::OsStr::to_os_string);
    name.push(BACKUP_SUFFIX);
    path.with_file_name(name)
}

/// Moving `original` aside to `backup`.
///
/// The backup is refused (reported as [`ResourceState::Invalid`]) when
/// something already exists at the backup path, or when `original` is not a
/// regular file. Nothing is ever overwritten.
#[derive(Debug, Clone)]
pub struct BackupResource {
    /// File to move aside.
    pub original: PathBuf,
    /// Where it goes.
    pub backup: PathBuf,
}

impl BackupResource {
    /// Back up `original` to [`backup_path`]`(original)`.
    #[must_use]
    pub fn for_path(original: &Path) -> Self {
        Self {
            original: original.to_path_buf(),
            backup: backup_path(original),
        }
    }
}

impl Resource for BackupResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.original.display(), self.backup.display())
    }

    fn current_state(&self) -> io::Result<ResourceState> {
        match std::fs::symlink_metadata(&self.backup) {
            Ok(_) => {
                return Ok(ResourceState::Invalid {
                    reason: format!("{} already exists", self.backup.display()),
                });
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }

        // is_file() follows links: a link to an ordinary file is moved as-is
        if !self.original.is_file() {
            return Ok(ResourceState::Invalid {
                reason: format!("{} is not a regular file", self.original.display()),
            });
        }

        Ok(ResourceState::Missing)
    }

    fn apply(&self) -> io::Result<()> {
        std::fs::rename(&self.original, &self.backup)
    }
}
