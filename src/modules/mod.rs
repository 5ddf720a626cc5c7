//! Deployment modules and their elements.
//!
//! A [`Module`] is a named directory under the dotfiles root holding the
//! files to deploy and an `include.json` manifest listing them. Loading a
//! module turns every manifest entry into a [`ModuleElement`]; setting a
//! module up applies those elements, directories first.
mod element;
mod processing;

pub use element::{CreationMethod, ElementType, ModuleElement};
pub use processing::SetupStats;

use anyhow::{Context as _, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config::manifest::{self, MANIFEST_FILE};
use crate::context::Context;
use crate::error::ConfigError;
use crate::resources::fs::normalize;

/// A deployment group with its own source directory and manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
    /// Game configuration and launcher scripts.
    Games,
}

impl Module {
    /// Every module, in deployment order.
    pub const ALL: [Self; 1] = [Self::Games];

    /// Display name, also the name of the module's source directory.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Games => "Games",
        }
    }

    /// Source directory relative to the dotfiles root.
    #[must_use]
    pub fn relative_path(self) -> &'static Path {
        Path::new(self.name())
    }

    /// Absolute source directory under `root`.
    #[must_use]
    pub fn source_dir(self, root: &Path) -> PathBuf {
        normalize(&root.join(self.relative_path()))
    }

    /// Path of the module's manifest under `root`.
    #[must_use]
    pub fn manifest_path(self, root: &Path) -> PathBuf {
        self.source_dir(root).join(MANIFEST_FILE)
    }

    /// Load the manifest and build the module's elements, ordered by
    /// creation priority. Entries sharing a method keep their manifest order.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the manifest cannot be loaded or lists a
    /// source path that does not exist.
    pub fn includes(self, root: &Path) -> Result<Vec<ModuleElement>, ConfigError> {
        let manifest = manifest::load(&self.manifest_path(root))?;
        let mut elements = manifest
            .entries
            .into_iter()
            .map(|entry| ModuleElement::new(self, root, entry.method, entry.path))
            .collect::<Result<Vec<_>, _>>()?;
        elements.sort_by_key(|e| e.method().priority());
        Ok(elements)
    }

    /// Deploy every element of this module from `ctx.root` to `ctx.dest`.
    ///
    /// Stops at the first failing element; elements already applied stay in
    /// place.
    ///
    /// # Errors
    ///
    /// Returns an error if the module cannot be loaded or an element fails.
    pub fn setup(self, ctx: &Context) -> Result<SetupStats> {
        let elements = self.includes(&ctx.root)?;
        ctx.log.debug(&format!(
            "{}: {} elements from {}",
            self.name(),
            elements.len(),
            self.manifest_path(&ctx.root).display()
        ));

        let mut stats = SetupStats::new();
        for element in &elements {
            stats += element.setup(ctx).with_context(|| {
                format!(
                    "setting up {} ({})",
                    element.relative_path().display(),
                    element.method()
                )
            })?;
        }
        Ok(stats)
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Module {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownModule(s.to_string()))
    }
}
