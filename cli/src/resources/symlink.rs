//! Symlink resource.
use std::io;
use std::path::{Path, PathBuf};

use super::{Resource, ResourceState};

/// A symlink resource that can be checked and applied.
#[derive(Debug, Clone)]
pub struct SymlinkResource {
    /// The source file/directory (what the symlink points to).
    pub source: PathBuf,
    /// The target path (where the symlink will be created).
    pub target: PathBuf,
}

impl SymlinkResource {
    /// Create a new symlink resource.
    #[must_use]
    pub const fn new(source: PathBuf, target: PathBuf) -> Self {
        Self { source, target }
    }
}

impl Resource for SymlinkResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.target.display(), self.source.display())
    }

    fn current_state(&self) -> io::Result<ResourceState> {
        if !self.source.exists() {
            return Ok(ResourceState::Invalid {
                reason: format!("source does not exist: {}", self.source.display()),
            });
        }

        let meta = match std::fs::symlink_metadata(&self.target) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ResourceState::Missing),
            Err(e) => return Err(e),
        };

        if meta.file_type().is_symlink() {
            let points_to = std::fs::read_link(&self.target)?;
            // exists() follows the link
            if !self.target.exists() {
                return Ok(ResourceState::Broken { points_to });
            }
            if resolves_to_same(&self.target, &self.source) {
                return Ok(ResourceState::Correct);
            }
            return Ok(ResourceState::Incorrect {
                current: format!("points to {}", points_to.display()),
            });
        }

        let current = if meta.is_dir() {
            "target is a directory"
        } else {
            "target is a regular file"
        };
        Ok(ResourceState::Incorrect {
            current: current.to_string(),
        })
    }

    fn apply(&self) -> io::Result<()> {
        create_symlink(&self.source, &self.target)
    }
}

/// Whether `a` and `b` resolve to the same canonical path.
fn resolves_to_same(a: &Path, b: &Path) -> bool {
    match (dunce::canonicalize(a), dunce::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Create a symlink at `link` pointing to `target`.
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link)
    }

    #[cfg(windows)]
    {
        if target.is_dir() {
            std::os::windows::fs::symlink_dir(target, link)
        } else {
            std::os::windows::fs::symlink_file(target, link)
        }
    }
}
