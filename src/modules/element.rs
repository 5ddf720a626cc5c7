//! Module elements: one deployable file or directory and how to create it.
use anyhow::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::Module;
use super::processing::{SetupStats, process_resource};
use crate::context::Context;
use crate::error::ConfigError;
use crate::logging::Outcome;
use crate::resources::chmod::ChmodResource;
use crate::resources::copy::CopyResource;
use crate::resources::directory::DirectoryResource;
use crate::resources::fs::normalize;
use crate::resources::symlink::SymlinkResource;
use crate::resources::{Resource, ResourceChange};

/// File name suffix of elements that are made executable after deployment.
const SHELL_SCRIPT_SUFFIX: &str = ".sh";

/// How an element is created at its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreationMethod {
    /// Create the destination as a directory (`mkdir`).
    MakeDirectory,
    /// Copy the source file to the destination (`copy`).
    Copy,
    /// Link the destination to the source (`symlink`).
    Symlink,
}

impl CreationMethod {
    /// Application order: directories first so later copies and links have
    /// somewhere to land. Copy before symlink is a fixed tie-break.
    pub const PRIORITY: [Self; 3] = [Self::MakeDirectory, Self::Copy, Self::Symlink];

    /// Position of this method in [`PRIORITY`](Self::PRIORITY); lower runs first.
    #[must_use]
    pub fn priority(self) -> usize {
        Self::PRIORITY
            .iter()
            .position(|m| *m == self)
            .unwrap_or(Self::PRIORITY.len())
    }

    /// Manifest key naming this method.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::MakeDirectory => "mkdir",
            Self::Copy => "copy",
            Self::Symlink => "symlink",
        }
    }
}

impl fmt::Display for CreationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for CreationMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mkdir" => Ok(Self::MakeDirectory),
            "copy" => Ok(Self::Copy),
            "symlink" => Ok(Self::Symlink),
            _ => Err(ConfigError::UnknownCreationMethod(s.to_string())),
        }
    }
}

/// What an element's source path turned out to be when it was probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    /// A regular file (or a symlink to one).
    File,
    /// A directory (or a symlink to one).
    Directory,
    /// Anything else.
    Unknown,
}

impl ElementType {
    /// Probe `path`, following symlinks.
    #[must_use]
    pub fn probe(path: &Path) -> Self {
        if path.is_file() {
            Self::File
        } else if path.is_dir() {
            Self::Directory
        } else {
            Self::Unknown
        }
    }
}

/// A single file or directory of a module, with its creation method.
#[derive(Debug, Clone)]
pub struct ModuleElement {
    module: Module,
    method: CreationMethod,
    relative: PathBuf,
    source: PathBuf,
    exist_ok: bool,
    kind: ElementType,
}

impl ModuleElement {
    /// Build an element for `relative` inside `module`'s source directory
    /// under the absolute dotfiles `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSource`] if the resolved source path
    /// does not exist.
    pub fn new(
        module: Module,
        root: &Path,
        method: CreationMethod,
        relative: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let relative = relative.into();
        let source = normalize(&module.source_dir(root).join(&relative));
        if !source.exists() {
            return Err(ConfigError::MissingSource(source));
        }
        let kind = ElementType::probe(&source);
        Ok(Self {
            module,
            method,
            relative,
            source,
            exist_ok: true,
            kind,
        })
    }

    /// Set whether an already existing destination directory is tolerated.
    #[must_use]
    pub const fn with_exist_ok(mut self, exist_ok: bool) -> Self {
        self.exist_ok = exist_ok;
        self
    }

    /// Module this element belongs to.
    #[must_use]
    pub const fn module(&self) -> Module {
        self.module
    }

    /// How this element is created.
    #[must_use]
    pub const fn method(&self) -> CreationMethod {
        self.method
    }

    /// Path as written in the manifest.
    #[must_use]
    pub fn relative_path(&self) -> &Path {
        &self.relative
    }

    /// Absolute, normalized source path.
    #[must_use]
    pub fn source_path(&self) -> &Path {
        &self.source
    }

    /// Kind of the source path, probed at construction.
    #[must_use]
    pub const fn kind(&self) -> ElementType {
        self.kind
    }

    /// Destination of this element under `dest_root`.
    #[must_use]
    pub fn destination(&self, dest_root: &Path) -> PathBuf {
        normalize(&dest_root.join(&self.relative))
    }

    /// Whether the element is a shell script that must end up executable.
    #[must_use]
    pub fn is_shell_script(&self) -> bool {
        self.kind == ElementType::File
            && self
                .relative
                .file_name()
                .is_some_and(|name| name.to_string_lossy().ends_with(SHELL_SCRIPT_SUFFIX))
    }

    /// Deploy this element under `ctx.dest`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DirectoryFromFile`] for a make-directory element
    /// whose source is a file, [`ConfigError::DirectoryCopy`] for a copy of a
    /// directory, and any error from the underlying filesystem operation.
    pub fn setup(&self, ctx: &Context) -> Result<SetupStats> {
        let dest = self.destination(&ctx.dest);

        let resource: Box<dyn Resource> = match self.method {
            CreationMethod::MakeDirectory => {
                if self.kind == ElementType::File {
                    return Err(ConfigError::DirectoryFromFile(self.source.clone()).into());
                }
                Box::new(DirectoryResource::new(dest.clone(), self.exist_ok))
            }
            CreationMethod::Copy => {
                if self.kind == ElementType::Directory && !dest.is_dir() {
                    return Err(ConfigError::DirectoryCopy(self.source.clone()).into());
                }
                Box::new(CopyResource::new(self.source.clone(), dest.clone()))
            }
            CreationMethod::Symlink => {
                Box::new(SymlinkResource::new(self.source.clone(), dest.clone()))
            }
        };

        let (change, mut stats) = process_resource(ctx, resource.as_ref())?;

        if self.is_shell_script() {
            let chmod = ChmodResource::executable(dest);
            if change == ResourceChange::Applied {
                if chmod.needs_change()? {
                    chmod.apply()?;
                    ctx.log.outcome(Outcome::Applied, &chmod.description());
                }
            } else if change == ResourceChange::DryRun {
                ctx.log.outcome(Outcome::Planned, &chmod.description());
            }
        }

        stats.elements += 1;
        Ok(stats)
    }
}
