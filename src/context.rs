//! Shared state for a deployment run.
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::logging::Log;

/// Shared context for module setup.
pub struct Context {
    /// Absolute dotfiles root holding the module directories.
    pub root: PathBuf,
    /// Absolute destination root (normally the home directory).
    pub dest: PathBuf,
    /// Logger for output and module recording.
    pub log: Arc<dyn Log>,
    /// Whether to perform a dry run (preview changes without applying).
    pub dry_run: bool,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("root", &self.root)
            .field("dest", &self.dest)
            .field("log", &"<dyn Log>")
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl Context {
    /// Creates a new context for module setup.
    #[must_use]
    pub fn new(root: PathBuf, dest: PathBuf, log: Arc<dyn Log>, dry_run: bool) -> Self {
        Self {
            root,
            dest,
            log,
            dry_run,
        }
    }
}

/// The current user's home directory.
///
/// Reads `USERPROFILE` (falling back to `HOME`) on Windows and `HOME`
/// elsewhere.
///
/// # Errors
///
/// Returns [`ConfigError::HomeNotSet`] if the variable is not set.
pub fn home_dir() -> Result<PathBuf, ConfigError> {
    let home = if cfg!(target_os = "windows") {
        std::env::var_os("USERPROFILE")
            .or_else(|| std::env::var_os("HOME"))
            .ok_or(ConfigError::HomeNotSet("USERPROFILE"))?
    } else {
        std::env::var_os("HOME").ok_or(ConfigError::HomeNotSet("HOME"))?
    };
    Ok(PathBuf::from(home))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::logging::Logger;

    #[test]
    fn debug_hides_logger() {
        let ctx = Context::new(
            PathBuf::from("/dots"),
            PathBuf::from("/home/user"),
            Arc::new(Logger::new(None)),
            true,
        );
        let debug = format!("{ctx:?}");
        assert!(debug.contains("<dyn Log>"));
        assert!(debug.contains("dry_run: true"));
        assert!(debug.contains("/home/user"));
    }

    #[cfg(unix)]
    #[test]
    fn home_dir_reads_home() {
        // HOME is set in every supported test environment.
        if let Some(expected) = std::env::var_os("HOME") {
            assert_eq!(home_dir().unwrap(), PathBuf::from(expected));
        }
    }
}
