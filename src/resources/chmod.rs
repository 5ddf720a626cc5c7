//! File permission resource.
use anyhow::{Context as _, Result};
use std::path::PathBuf;

use super::{Resource, ResourceChange, ResourceState};

/// Mode given to deployed shell scripts.
pub const EXECUTABLE_MODE: u32 = 0o755;

/// A file permission resource that can be checked and applied (Unix only).
///
/// Permissions are read and written through symlinks, so a resource aimed
/// at a link changes the file it points to.
#[derive(Debug, Clone)]
pub struct ChmodResource {
    /// Target file path (absolute).
    pub target: PathBuf,
    /// Permission mode (e.g. `0o755`).
    pub mode: u32,
}

impl ChmodResource {
    /// Create a new chmod resource.
    #[must_use]
    pub const fn new(target: PathBuf, mode: u32) -> Self {
        Self { target, mode }
    }

    /// Create a resource that marks `target` executable for everyone.
    #[must_use]
    pub const fn executable(target: PathBuf) -> Self {
        Self::new(target, EXECUTABLE_MODE)
    }
}

impl Resource for ChmodResource {
    fn description(&self) -> String {
        format!("Chmod {:o} {}", self.mode, self.target.display())
    }

    fn current_state(&self) -> Result<ResourceState> {
        if !self.target.exists() {
            return Ok(ResourceState::Invalid {
                reason: format!("target does not exist: {}", self.target.display()),
            });
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let current_mode = std::fs::metadata(&self.target)
                .with_context(|| format!("read permissions: {}", self.target.display()))?
                .permissions()
                .mode()
                & 0o7777;

            if current_mode == self.mode {
                Ok(ResourceState::Correct)
            } else {
                Ok(ResourceState::Incorrect {
                    current: format!("{current_mode:o}"),
                })
            }
        }

        #[cfg(not(unix))]
        {
            Ok(ResourceState::Invalid {
                reason: "chmod not supported on this platform".to_string(),
            })
        }
    }

    fn apply(&self) -> Result<ResourceChange> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            std::fs::set_permissions(&self.target, std::fs::Permissions::from_mode(self.mode))
                .with_context(|| format!("set permissions: {}", self.target.display()))?;
            Ok(ResourceChange::Applied)
        }

        #[cfg(not(unix))]
        {
            Ok(ResourceChange::Skipped {
                reason: "chmod not supported on this platform".to_string(),
            })
        }
    }
}
