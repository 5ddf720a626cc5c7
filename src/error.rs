//! Domain-specific error types for the deployment engine.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Manifest loading and element construction return typed errors (e.g.,
//! [`ConfigError`]) while the command handler at the CLI boundary converts
//! them to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error kinds
//!
//! ```text
//! ConfigError     manifest parsing, element configuration, environment
//! ResourceError   destination states a resource refuses to work with
//! ```
//!
//! Failures of the underlying filesystem calls are not classified further:
//! they travel as [`anyhow::Error`] with the failing operation and path
//! attached as context, keeping the original [`std::io::Error`] as the root
//! cause.

use std::path::PathBuf;

use thiserror::Error;

/// Errors caused by a wrong manifest, module selection or environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The manifest file could not be read.
    #[error("cannot read manifest {}: {source}", .path.display())]
    ManifestIo {
        /// Path of the manifest.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The manifest is not an object of string to list of strings.
    #[error("malformed manifest {}: {message}", .path.display())]
    MalformedManifest {
        /// Path of the manifest.
        path: PathBuf,
        /// Parser or shape error description.
        message: String,
    },

    /// A manifest key does not name a known creation method.
    #[error("unknown creation method '{0}': must be one of mkdir, copy, symlink")]
    UnknownCreationMethod(String),

    /// A module name given on the command line is not defined.
    #[error("unknown module '{0}'")]
    UnknownModule(String),

    /// A manifest entry refers to a source path that does not exist.
    #[error("path {} does not exist", .0.display())]
    MissingSource(PathBuf),

    /// A make-directory entry refers to a regular file.
    #[error("cannot create directory from a file element: {}", .0.display())]
    DirectoryFromFile(PathBuf),

    /// A copy entry refers to a directory, which is never copied recursively.
    #[error("cannot copy directory element: {}", .0.display())]
    DirectoryCopy(PathBuf),

    /// No home directory could be determined for the default destination.
    #[error("{0} environment variable is not set")]
    HomeNotSet(&'static str),
}

/// Errors that arise from resource checks and apply operations.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// A directory already exists where one was to be created exclusively.
    #[error("directory already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// A destination exists but is neither a file, a directory nor a symlink.
    #[error("invalid state for '{}': {reason}", .path.display())]
    InvalidState {
        /// Destination path.
        path: PathBuf,
        /// Human-readable explanation of why the state is invalid.
        reason: String,
    },
}
