//! Manifest entries resolved against a repository root and home directory.
use std::path::{Path, PathBuf};

use crate::config::DotfileEntry;

/// A manifest entry with every path made absolute for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDotfile {
    /// Entry name, for log lines.
    pub name: String,
    /// File in the dotfiles repository.
    pub source: PathBuf,
    /// Where the link goes.
    pub destination: PathBuf,
    /// Directory that must exist before the link is created.
    pub parent: PathBuf,
    /// Compile script, resolved against the source's directory.
    pub compile_script: Option<PathBuf>,
    /// Mode bits from the manifest.
    pub permissions: Option<u32>,
}

impl ResolvedDotfile {
    /// Resolve `entry` against the repository `root` and `home`.
    ///
    /// An absolute destination replaces `home`, which is what
    /// [`Path::join`] does.
    #[must_use]
    pub fn resolve(entry: &DotfileEntry, root: &Path, home: &Path) -> Self {
        let source = root.join(&entry.source);
        let destination = home.join(&entry.destination);
        let parent = destination
            .parent()
            .map_or_else(|| home.to_path_buf(), Path::to_path_buf);
        let compile_script = entry
            .compile_script
            .as_ref()
            .map(|script| source.parent().unwrap_or(root).join(script));

        Self {
            name: entry.name.clone(),
            source,
            destination,
            parent,
            compile_script,
            permissions: entry.permissions,
        }
    }

    /// Directory containing the source; compile scripts run here.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        self.source.parent().unwrap_or(&self.source)
    }
}
