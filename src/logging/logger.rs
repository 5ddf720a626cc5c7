//! Console logger with dry-run awareness and per-module summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::types::{
    ALREADY_OK, APPLIED, Log, ModuleEntry, ModuleStatus, Outcome, PLANNED, SKIPPED, STAGE, SUMMARY,
};

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger with dry-run awareness and summary collection.
///
/// Messages go through [`tracing`]; the subscriber installed by
/// [`init_subscriber`](super::subscriber::init_subscriber) renders them on the
/// console and appends them to the log file.
#[derive(Debug, Default)]
pub struct Logger {
    modules: Mutex<Vec<ModuleEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger.
    ///
    /// `log_file` is only displayed in the run summary; the file itself is
    /// written by the subscriber's file layer.
    #[must_use]
    pub fn new(log_file: Option<PathBuf>) -> Self {
        Self {
            modules: Mutex::new(Vec::new()),
            log_file,
        }
    }

    /// Return a clone of all recorded module entries.
    #[must_use]
    pub fn module_entries(&self) -> Vec<ModuleEntry> {
        self.modules.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Report the outcome of one filesystem step.
    pub fn outcome(&self, outcome: Outcome, action: &str) {
        match outcome {
            Outcome::Applied => tracing::info!(target: APPLIED, "{action}"),
            Outcome::AlreadyOk => tracing::info!(target: ALREADY_OK, "{action}"),
            Outcome::Skipped => tracing::info!(target: SKIPPED, "{action}"),
            Outcome::Planned => tracing::info!(target: PLANNED, "{action}"),
        }
    }

    /// Record a module result for the summary.
    pub fn record_module(&self, name: &str, status: ModuleStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.modules.lock() {
            guard.push(ModuleEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Count the number of failed modules.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.modules.lock().map_or(0, |guard| {
            guard
                .iter()
                .filter(|m| m.status == ModuleStatus::Failed)
                .count()
        })
    }

    /// Print the summary of all recorded modules, then the log file path.
    pub fn print_summary(&self) {
        let modules = self.module_entries();
        if modules.is_empty() {
            return;
        }

        self.stage("Summary");
        for module in &modules {
            let detail = module
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));
            tracing::info!(
                target: SUMMARY,
                status = module.status.as_str(),
                "{}{detail}",
                module.name
            );
        }

        if let Some(path) = &self.log_file {
            self.info(&format!("log: {}", path.display()));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error);

    fn outcome(&self, outcome: Outcome, action: &str) {
        self.outcome(outcome, action);
    }

    fn record_module(&self, name: &str, status: ModuleStatus, message: Option<&str>) {
        self.record_module(name, status, message);
    }
}
