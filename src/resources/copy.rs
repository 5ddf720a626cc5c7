//! Copy resource.
use anyhow::{Context as _, Result};
use std::path::PathBuf;

use super::fs::{Occupant, occupant, remove_existing};
use super::{Resource, ResourceChange, ResourceState};
use crate::error::ResourceError;

/// A regular file copied from `source` to `target`.
///
/// An existing file at `target` is always refreshed; an existing directory is
/// never touched.
#[derive(Debug, Clone)]
pub struct CopyResource {
    /// The file to copy.
    pub source: PathBuf,
    /// Where the copy is written.
    pub target: PathBuf,
}

impl CopyResource {
    /// Create a new copy resource.
    #[must_use]
    pub const fn new(source: PathBuf, target: PathBuf) -> Self {
        Self { source, target }
    }
}

impl Resource for CopyResource {
    fn description(&self) -> String {
        format!("Copy {} -> {}", self.source.display(), self.target.display())
    }

    fn current_state(&self) -> Result<ResourceState> {
        match occupant(&self.target) {
            Occupant::Nothing => Ok(ResourceState::Missing),
            Occupant::File => Ok(ResourceState::Incorrect {
                current: "existing file".to_string(),
            }),
            Occupant::Directory => Ok(ResourceState::Invalid {
                reason: format!(
                    "directory {} already exists, skipping copy",
                    self.target.display()
                ),
            }),
            Occupant::Other => Err(ResourceError::InvalidState {
                path: self.target.clone(),
                reason: "neither a file nor a directory".to_string(),
            }
            .into()),
        }
    }

    fn apply(&self) -> Result<ResourceChange> {
        remove_existing(&self.target)?;
        // std::fs::copy carries the permission bits over along with the bytes.
        std::fs::copy(&self.source, &self.target).with_context(|| {
            format!(
                "copy {} to {}",
                self.source.display(),
                self.target.display()
            )
        })?;
        Ok(ResourceChange::Applied)
    }
}
