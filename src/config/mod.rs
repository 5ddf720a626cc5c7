//! Configuration loading: per-module manifests.
pub mod manifest;
