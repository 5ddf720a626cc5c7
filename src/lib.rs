//! Module-based dotfiles deployment.
//!
//! Each module is a directory under the dotfiles root with an `include.json`
//! manifest that lists which of its paths to create as directories, copy, or
//! symlink into the destination (normally the home directory).
//!
//! The public API is organised into these layers:
//!
//! - **[`config`]**: parse module manifests
//! - **[`modules`]**: the module enumeration and its elements, ordered and
//!   dispatched to resources
//! - **[`resources`]**: idempotent `check + apply` filesystem primitives
//! - **[`commands`]**: top-level orchestration of a deployment run
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod modules;
pub mod resources;
