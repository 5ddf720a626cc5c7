//! Single-resource processing: check state, then apply, skip or preview.

use anyhow::Result;
use std::ops::AddAssign;

use crate::context::Context;
use crate::logging::Outcome;
use crate::resources::{Resource, ResourceChange, ResourceState};

/// Counters for a module setup run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetupStats {
    /// Number of elements processed.
    pub elements: u32,
    /// Number of elements created, replaced or (in a dry run) that would be.
    pub changed: u32,
    /// Number of elements already in place.
    pub already_ok: u32,
    /// Number of elements left untouched (e.g. existing directories).
    pub skipped: u32,
}

impl SetupStats {
    /// Create a new empty stats counter.
    ///
    /// # Examples
    ///
    /// ```
    /// use dotmodules::modules::SetupStats;
    ///
    /// let stats = SetupStats::new();
    /// assert_eq!(stats.changed, 0);
    /// assert_eq!(stats.skipped, 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Format the summary string (e.g. "3 changed, 1 already ok, 0 skipped").
    ///
    /// # Examples
    ///
    /// ```
    /// use dotmodules::modules::SetupStats;
    ///
    /// let stats = SetupStats { elements: 4, changed: 3, already_ok: 1, skipped: 0 };
    /// assert_eq!(stats.summary(false), "3 changed, 1 already ok, 0 skipped");
    /// assert_eq!(stats.summary(true), "3 would change, 1 already ok, 0 skipped");
    /// ```
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let verb = if dry_run { "would change" } else { "changed" };
        format!(
            "{} {verb}, {} already ok, {} skipped",
            self.changed, self.already_ok, self.skipped
        )
    }
}

impl AddAssign for SetupStats {
    fn add_assign(&mut self, rhs: Self) {
        self.elements += rhs.elements;
        self.changed += rhs.changed;
        self.already_ok += rhs.already_ok;
        self.skipped += rhs.skipped;
    }
}

/// Process a single resource: read its state, then apply it, skip it, or
/// (in a dry run) describe what would happen.
///
/// Returns the outcome together with a stats delta.
///
/// # Errors
///
/// Returns an error if the state cannot be read or applying fails.
pub(super) fn process_resource(
    ctx: &Context,
    resource: &dyn Resource,
) -> Result<(ResourceChange, SetupStats)> {
    let desc = resource.description();
    let mut delta = SetupStats::new();
    let change = match resource.current_state()? {
        ResourceState::Correct => {
            ctx.log.outcome(Outcome::AlreadyOk, &desc);
            delta.already_ok += 1;
            ResourceChange::AlreadyCorrect
        }
        ResourceState::Invalid { reason } => {
            ctx.log.outcome(Outcome::Skipped, &capitalize(&reason));
            delta.skipped += 1;
            ResourceChange::Skipped { reason }
        }
        state @ (ResourceState::Missing | ResourceState::Incorrect { .. }) => {
            if ctx.dry_run {
                let action = if let ResourceState::Incorrect { current } = state {
                    format!("{desc} (replacing {current})")
                } else {
                    desc
                };
                ctx.log.outcome(Outcome::Planned, &action);
                delta.changed += 1;
                ResourceChange::DryRun
            } else {
                let change = resource.apply()?;
                if change == ResourceChange::Applied {
                    ctx.log.outcome(Outcome::Applied, &desc);
                    delta.changed += 1;
                }
                change
            }
        }
    };
    Ok((change, delta))
}

/// Upper-case the first character of `s`.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
