//! Idempotent filesystem primitives (check + apply pattern).
pub mod chmod;
pub mod copy;
pub mod directory;
pub mod fs;
pub mod symlink;

use anyhow::Result;

/// State of a destination path relative to what a resource wants there.
///
/// # Examples
///
/// ```
/// use dotmodules::resources::ResourceState;
///
/// let missing = ResourceState::Missing;
/// let correct = ResourceState::Correct;
/// let stale = ResourceState::Incorrect { current: "regular file".into() };
/// let skip = ResourceState::Invalid { reason: "destination is a directory".into() };
///
/// assert_ne!(missing, correct);
/// assert_eq!(correct, ResourceState::Correct);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Nothing exists at the destination.
    Missing,
    /// The destination already matches the desired state.
    Correct,
    /// The destination exists and will be replaced.
    Incorrect {
        /// What currently occupies the destination.
        current: String,
    },
    /// The destination must be left alone (e.g. an existing directory).
    Invalid {
        /// Reason why the resource is not applied.
        reason: String,
    },
}

/// Result of processing a resource.
///
/// # Examples
///
/// ```
/// use dotmodules::resources::ResourceChange;
///
/// let applied = ResourceChange::Applied;
/// let noop = ResourceChange::AlreadyCorrect;
/// let skipped = ResourceChange::Skipped { reason: "destination is a directory".into() };
///
/// assert_eq!(applied, ResourceChange::Applied);
/// assert_ne!(applied, noop);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// Resource was created or replaced.
    Applied,
    /// Resource was already correct (no change needed).
    AlreadyCorrect,
    /// Resource was left untouched.
    Skipped {
        /// Reason why the resource was skipped.
        reason: String,
    },
    /// Resource would have been applied, but the run is a dry run.
    DryRun,
}

/// A filesystem entry that can be checked and applied.
///
/// # Examples
///
/// ```ignore
/// // All resources follow the same check-then-apply pattern:
/// let state = resource.current_state()?;
/// if resource.needs_change()? {
///     resource.apply()?;
/// }
/// ```
pub trait Resource {
    /// Human-readable description of this resource, used in progress lines.
    fn description(&self) -> String;

    /// Check the current state of the destination.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be determined, or if the
    /// destination is in a state the resource refuses to work with.
    fn current_state(&self) -> Result<ResourceState>;

    /// Bring the destination into the desired state.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying filesystem operation fails.
    fn apply(&self) -> Result<ResourceChange>;

    /// Determine if the resource needs to be changed.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`current_state`](Self::current_state).
    fn needs_change(&self) -> Result<bool> {
        Ok(matches!(
            self.current_state()?,
            ResourceState::Missing | ResourceState::Incorrect { .. }
        ))
    }
}
