// Shared helpers for integration tests.
//
// Provides a temporary dotfiles root and destination plus a fluent builder
// so each integration test can lay out a module without repeating
// filesystem boilerplate.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dotmodules::context::Context;
use dotmodules::logging::{Log, Logger};
use dotmodules::modules::Module;

/// An isolated dotfiles root and destination, each backed by a
/// [`tempfile::TempDir`] that is deleted on drop.
pub struct IntegrationTestContext {
    /// Temporary dotfiles root holding the module directories.
    pub root: tempfile::TempDir,
    /// Temporary destination standing in for the home directory.
    pub dest: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a context with an empty `Games` module directory.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create root dir");
        let dest = tempfile::tempdir().expect("create dest dir");
        std::fs::create_dir_all(Module::Games.source_dir(root.path())).expect("create module dir");
        Self { root, dest }
    }

    /// Path to the dotfiles root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Path to the destination root.
    pub fn dest_path(&self) -> &Path {
        self.dest.path()
    }

    /// Source path of `relative` inside the `Games` module.
    pub fn source(&self, relative: &str) -> PathBuf {
        Module::Games.source_dir(self.root.path()).join(relative)
    }

    /// Destination path of `relative`.
    pub fn target(&self, relative: &str) -> PathBuf {
        self.dest.path().join(relative)
    }

    /// Build a run context with a fresh logger.
    pub fn context(&self, dry_run: bool) -> (Context, Arc<Logger>) {
        let log = Arc::new(Logger::new(None));
        let ctx = Context::new(
            self.root.path().to_path_buf(),
            self.dest.path().to_path_buf(),
            Arc::clone(&log) as Arc<dyn Log>,
            dry_run,
        );
        (ctx, log)
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a new context with an empty `Games` module.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Write the module manifest.
    pub fn with_manifest(self, content: &str) -> Self {
        let path = Module::Games.manifest_path(self.ctx.root.path());
        std::fs::write(path, content).expect("write manifest");
        self
    }

    /// Create a source file inside the module, with parent directories.
    pub fn with_source_file(self, relative: &str, content: &str) -> Self {
        let path = self.ctx.source(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create source parent");
        }
        std::fs::write(&path, content).expect("write source file");
        self
    }

    /// Create a source directory inside the module.
    pub fn with_source_dir(self, relative: &str) -> Self {
        std::fs::create_dir_all(self.ctx.source(relative)).expect("create source dir");
        self
    }

    /// Create a directory in the destination before the run.
    pub fn with_existing_dest_dir(self, relative: &str) -> Self {
        std::fs::create_dir_all(self.ctx.target(relative)).expect("create dest dir");
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}

/// The standard `Games` layout: a `bin` directory with a launcher script and
/// a top-level config file, listed with the keys in reverse priority order.
pub fn games_module() -> IntegrationTestContext {
    TestContextBuilder::new()
        .with_source_dir("bin")
        .with_source_file("bin/run.sh", "#!/bin/sh\necho run\n")
        .with_source_file("config.json", "{\"volume\": 3}\n")
        .with_manifest(r#"{"symlink": ["config.json"], "copy": ["bin/run.sh"], "mkdir": ["bin"]}"#)
        .build()
}
