//! Command handlers invoked from `main`.
pub mod deploy;
