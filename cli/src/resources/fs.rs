//! File-system helpers shared by the deployer.
use std::io;
use std::path::Path;

/// Mode for directories created on the way to a destination.
pub const DIR_MODE: u32 = 0o755;

/// Create `dir` and any missing ancestors. New directories get
/// [`DIR_MODE`] (subject to the umask); existing ones are left alone.
///
/// # Errors
///
/// Returns the underlying I/O error if a directory cannot be created.
pub fn create_dir_all(dir: &Path) -> io::Result<()> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }

    builder.create(dir)
}

/// Remove an existing file or symlink at `path`, including broken symlinks.
/// Does nothing if `path` does not exist.
///
/// # Errors
///
/// Returns an error if the path exists but cannot be removed.
pub fn remove_existing(path: &Path) -> io::Result<()> {
    if path.symlink_metadata().is_ok() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}
