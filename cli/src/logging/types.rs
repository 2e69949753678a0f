//! Core logging types: per-entry records, status, and the [`Log`] trait.

/// Deployment result of one dotfile, kept for the run summary.
#[derive(Debug, Clone)]
pub struct EntryRecord {
    /// Dotfile name from the manifest.
    pub name: String,
    /// Final status of the entry.
    pub status: EntryStatus,
    /// Optional detail message (e.g., skip reason or error description).
    pub message: Option<String>,
}

/// Status of a processed dotfile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// A new symlink was created.
    Deployed,
    /// The destination already was the correct symlink.
    AlreadyDeployed,
    /// The entry was left alone (e.g., backup refused).
    Skipped,
    /// Dry-run mode; the entry would have been linked.
    DryRun,
    /// The entry could not be deployed.
    Failed,
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) is the production implementation; tests
/// substitute a recorder so the deployer's decisions can be asserted on.
pub trait Log: Send + Sync {
    /// Log a stage header (one per dotfile).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (suppressed on console unless verbose).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record an entry result for the summary.
    fn record_entry(&self, name: &str, status: EntryStatus, message: Option<&str>);
}
