//! Directory resource.
use anyhow::{Context as _, Result};
use std::path::PathBuf;

use super::fs::{Occupant, occupant};
use super::{Resource, ResourceChange, ResourceState};
use crate::error::ResourceError;

/// A directory that must exist at `target`, created with all missing parents.
#[derive(Debug, Clone)]
pub struct DirectoryResource {
    /// Directory to create.
    pub target: PathBuf,
    /// Whether an already existing directory is acceptable.
    pub exist_ok: bool,
}

impl DirectoryResource {
    /// Create a new directory resource.
    #[must_use]
    pub const fn new(target: PathBuf, exist_ok: bool) -> Self {
        Self { target, exist_ok }
    }
}

impl Resource for DirectoryResource {
    fn description(&self) -> String {
        format!("Make directory {}", self.target.display())
    }

    fn current_state(&self) -> Result<ResourceState> {
        match occupant(&self.target) {
            Occupant::Nothing => Ok(ResourceState::Missing),
            Occupant::Directory if self.exist_ok => Ok(ResourceState::Correct),
            Occupant::Directory => Err(ResourceError::AlreadyExists(self.target.clone()).into()),
            Occupant::File | Occupant::Other => Err(ResourceError::InvalidState {
                path: self.target.clone(),
                reason: "exists and is not a directory".to_string(),
            }
            .into()),
        }
    }

    fn apply(&self) -> Result<ResourceChange> {
        std::fs::create_dir_all(&self.target)
            .with_context(|| format!("create directory: {}", self.target.display()))?;
        Ok(ResourceChange::Applied)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_when_target_absent() {
        let dir = tempfile::tempdir().unwrap();
        let resource = DirectoryResource::new(dir.path().join("bin"), true);
        assert_eq!(resource.current_state().unwrap(), ResourceState::Missing);
    }

    #[test]
    fn apply_creates_nested_parents() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a").join("b").join("c");
        let resource = DirectoryResource::new(target.clone(), true);
        assert_eq!(resource.apply().unwrap(), ResourceChange::Applied);
        assert!(target.is_dir());
    }

    #[test]
    fn existing_directory_is_correct_when_exist_ok() {
        let dir = tempfile::tempdir().unwrap();
        let resource = DirectoryResource::new(dir.path().to_path_buf(), true);
        assert_eq!(resource.current_state().unwrap(), ResourceState::Correct);
    }

    #[test]
    fn existing_directory_is_an_error_without_exist_ok() {
        let dir = tempfile::tempdir().unwrap();
        let resource = DirectoryResource::new(dir.path().to_path_buf(), false);
        let err = resource.current_state().unwrap_err();
        assert!(err.to_string().contains("directory already exists"));
    }

    #[test]
    fn file_in_the_way_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("bin");
        std::fs::write(&target, "not a dir").unwrap();
        let resource = DirectoryResource::new(target, true);
        let err = resource.current_state().unwrap_err();
        assert!(err.to_string().contains("exists and is not a directory"));
        assert!(resource.apply().is_err());
    }
}
