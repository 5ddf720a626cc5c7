//! Symlink resource.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use super::fs::{Occupant, occupant, remove_existing};
use super::{Resource, ResourceChange, ResourceState};
use crate::error::ResourceError;

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
        format!(
            "Symlink {} -> {}",
            self.source.display(),
            self.target.display()
        )
    }

    fn current_state(&self) -> Result<ResourceState> {
        match occupant(&self.target) {
            Occupant::Nothing => Ok(ResourceState::Missing),
            // Files are always relinked, even when the link is already right.
            Occupant::File => {
                let current = std::fs::read_link(&self.target).map_or_else(
                    |_| "regular file".to_string(),
                    |existing| format!("points to {}", existing.display()),
                );
                Ok(ResourceState::Incorrect { current })
            }
            Occupant::Directory => Ok(ResourceState::Invalid {
                reason: format!(
                    "directory {} already exists, skipping symlink creation",
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
        create_symlink(&self.source, &self.target)
            .with_context(|| format!("create link: {}", self.target.display()))?;
        Ok(ResourceChange::Applied)
    }
}

/// Create a symlink at `link` pointing to `target`.
fn create_symlink(target: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link).with_context(|| {
            format!(
                "creating symlink {} -> {}",
                link.display(),
                target.display()
            )
        })?;
    }

    #[cfg(windows)]
    {
        let result = if target.is_dir() {
            std::os::windows::fs::symlink_dir(target, link)
        } else {
            std::os::windows::fs::symlink_file(target, link)
        };
        result.with_context(|| {
            format!(
                "creating symlink {} -> {}",
                link.display(),
                target.display()
            )
        })?;
    }

    Ok(())
}

#[cfg(all(test, unix))]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn symlink_resource_description() {
        let resource = SymlinkResource::new(PathBuf::from("/source"), PathBuf::from("/target"));
        assert_eq!(resource.description(), "Symlink /source -> /target");
    }

    #[test]
    fn missing_when_target_not_exists() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = temp_dir.path().join("source");
        std::fs::write(&source, "test").unwrap();

        let resource = SymlinkResource::new(source, temp_dir.path().join("target"));
        assert_eq!(resource.current_state().unwrap(), ResourceState::Missing);
    }

    #[test]
    fn apply_links_to_source() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = temp_dir.path().join("source");
        let target = temp_dir.path().join("target");
        std::fs::write(&source, "linked content").unwrap();

        let resource = SymlinkResource::new(source.clone(), target.clone());
        assert_eq!(resource.apply().unwrap(), ResourceChange::Applied);
        assert_eq!(std::fs::read_link(&target).unwrap(), source);
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "linked content");
    }

    #[test]
    fn existing_link_is_replaced() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = temp_dir.path().join("source");
        let other = temp_dir.path().join("other");
        let target = temp_dir.path().join("target");
        std::fs::write(&source, "test").unwrap();
        std::fs::write(&other, "other").unwrap();
        std::os::unix::fs::symlink(&other, &target).unwrap();

        let resource = SymlinkResource::new(source.clone(), target.clone());
        assert!(matches!(
            resource.current_state().unwrap(),
            ResourceState::Incorrect { .. }
        ));
        resource.apply().unwrap();
        assert_eq!(std::fs::read_link(&target).unwrap(), source);
    }

    #[test]
    fn regular_file_is_replaced_by_link() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = temp_dir.path().join("source");
        let target = temp_dir.path().join("target");
        std::fs::write(&source, "content").unwrap();
        std::fs::write(&target, "other content").unwrap();

        let resource = SymlinkResource::new(source, target.clone());
        resource.apply().unwrap();
        assert!(target.symlink_metadata().unwrap().is_symlink());
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "content");
    }

    #[test]
    fn dangling_link_is_replaced() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = temp_dir.path().join("source");
        let target = temp_dir.path().join("target");
        std::fs::write(&source, "content").unwrap();
        std::os::unix::fs::symlink("/nonexistent/target", &target).unwrap();

        let resource = SymlinkResource::new(source.clone(), target.clone());
        resource.apply().unwrap();
        assert_eq!(std::fs::read_link(&target).unwrap(), source);
    }

    #[test]
    fn real_directory_is_invalid() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = temp_dir.path().join("source");
        let target = temp_dir.path().join("target");
        std::fs::write(&source, "content").unwrap();
        std::fs::create_dir(&target).unwrap();

        let resource = SymlinkResource::new(source, target);
        assert!(matches!(
            resource.current_state().unwrap(),
            ResourceState::Invalid { .. }
        ));
    }
}
