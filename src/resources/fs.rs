//! File-system resource helpers.
use anyhow::{Context as _, Result};
use std::path::{Component, Path, PathBuf};

/// What currently occupies a destination path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupant {
    /// Nothing, not even a dangling symlink.
    Nothing,
    /// A directory, or a symlink resolving to one.
    Directory,
    /// A regular file, a symlink resolving to one, or a dangling symlink.
    File,
    /// Anything else (socket, FIFO, device).
    Other,
}

/// Classify what occupies `path`, following symlinks.
///
/// A symlink whose target is missing is reported as [`Occupant::File`] so
/// callers replace it like any other stale file.
#[must_use]
pub fn occupant(path: &Path) -> Occupant {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Occupant::Directory,
        Ok(meta) if meta.is_file() => Occupant::File,
        Ok(_) => Occupant::Other,
        Err(_) if path.symlink_metadata().is_ok() => Occupant::File,
        Err(_) => Occupant::Nothing,
    }
}

/// Remove an existing file or symlink at `path`, including broken symlinks.
///
/// Does nothing if `path` does not exist.
///
/// # Errors
///
/// Returns an error if the path exists but cannot be removed.
pub fn remove_existing(path: &Path) -> Result<()> {
    if path.exists() || path.symlink_metadata().is_ok() {
        std::fs::remove_file(path)
            .with_context(|| format!("remove existing: {}", path.display()))?;
    }
    Ok(())
}

/// Lexically normalize `path`: drop `.` components and let `..` pop the
/// previous component. Symlinks are not resolved.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                None | Some(Component::ParentDir) => out.push(component),
                Some(Component::RootDir | Component::Prefix(_)) => {}
                Some(_) => {
                    out.pop();
                }
            },
            other => out.push(other),
        }
    }
    out
}

/// Make `path` absolute against the current directory and normalize it.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    let abs = std::path::absolute(path)
        .with_context(|| format!("resolve absolute path: {}", path.display()))?;
    Ok(normalize(&abs))
}
