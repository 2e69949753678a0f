//! Idempotent resource primitives (check + apply pattern).
pub mod backup;
pub mod chmod;
pub mod fs;
pub mod symlink;

use std::io;
use std::path::PathBuf;

/// State of a resource on disk.
///
/// # Examples
///
/// ```
/// use dotdeploy_cli::resources::ResourceState;
///
/// let missing = ResourceState::Missing;
/// let wrong = ResourceState::Incorrect { current: "target is a regular file".into() };
///
/// assert_ne!(missing, ResourceState::Correct);
/// assert_ne!(wrong, missing);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Resource does not exist.
    Missing,
    /// Resource exists and matches the desired state.
    Correct,
    /// A symlink is in place but what it points to does not exist.
    Broken {
        /// The dangling link target.
        points_to: PathBuf,
    },
    /// Resource exists but does not match the desired state.
    Incorrect {
        /// What is there instead.
        current: String,
    },
    /// Resource cannot be applied (e.g., its input is missing).
    Invalid {
        /// Reason why the resource cannot be applied.
        reason: String,
    },
}

/// A resource that can report its state and be brought to the desired one.
pub trait Resource {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Check the current state of the resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be determined (e.g., metadata of
    /// a path cannot be read).
    fn current_state(&self) -> io::Result<ResourceState>;

    /// Apply the change. Callers check [`Resource::current_state`] first;
    /// `apply` does not re-check.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the change cannot be made.
    fn apply(&self) -> io::Result<()>;

    /// Determine if the resource needs to be changed.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Resource::current_state`].
    fn needs_change(&self) -> io::Result<bool> {
        Ok(matches!(
            self.current_state()?,
            ResourceState::Missing | ResourceState::Broken { .. } | ResourceState::Incorrect { .. }
        ))
    }
}
