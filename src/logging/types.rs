//! Core logging types: step outcomes, module entries, and the [`Log`] trait.

/// Outcome of one filesystem step, reported on its own event target so the
/// console and the log file can render it without parsing the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The step changed the filesystem.
    Applied,
    /// The destination was already in the desired state.
    AlreadyOk,
    /// The destination was left untouched.
    Skipped,
    /// Dry run: the step would have changed the filesystem.
    Planned,
}

/// Event target for [`Outcome::Applied`].
pub(super) const APPLIED: &str = "dotmodules::applied";
/// Event target for [`Outcome::AlreadyOk`].
pub(super) const ALREADY_OK: &str = "dotmodules::already_ok";
/// Event target for [`Outcome::Skipped`].
pub(super) const SKIPPED: &str = "dotmodules::skipped";
/// Event target for [`Outcome::Planned`].
pub(super) const PLANNED: &str = "dotmodules::planned";
/// Event target for stage headers.
pub(super) const STAGE: &str = "dotmodules::stage";
/// Event target for per-module summary lines; carries a `status` field.
pub(super) const SUMMARY: &str = "dotmodules::summary";

impl Outcome {
    /// Recover the outcome from an event target.
    #[must_use]
    pub fn from_target(target: &str) -> Option<Self> {
        match target {
            APPLIED => Some(Self::Applied),
            ALREADY_OK => Some(Self::AlreadyOk),
            SKIPPED => Some(Self::Skipped),
            PLANNED => Some(Self::Planned),
            _ => None,
        }
    }
}

/// Module deployment result for summary reporting.
#[derive(Debug, Clone)]
pub struct ModuleEntry {
    /// Module display name.
    pub name: String,
    /// Final status of the module.
    pub status: ModuleStatus,
    /// Optional detail message (counts or error description).
    pub message: Option<String>,
}

/// Status of a processed module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleStatus {
    /// Every element was applied or already in place.
    Ok,
    /// Module ran in dry-run mode; no changes were applied.
    DryRun,
    /// Module aborted with an error.
    Failed,
}

impl ModuleStatus {
    /// Name carried in the `status` field of summary events.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::DryRun => "dry-run",
            Self::Failed => "failed",
        }
    }

    /// Inverse of [`as_str`](Self::as_str).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        [Self::Ok, Self::DryRun, Self::Failed]
            .into_iter()
            .find(|s| s.as_str() == name)
    }
}

/// Abstraction over logging backends.
///
/// Deployment code logs through `&dyn Log` so that tests can swap the
/// console logger for one that only records.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Report the outcome of one filesystem step described by `action`.
    fn outcome(&self, outcome: Outcome, action: &str);
    /// Record a module result for the summary.
    fn record_module(&self, name: &str, status: ModuleStatus, message: Option<&str>);
}
