//! Line rendering shared by the console formatter and the log file layer.
//!
//! Events are classified once into a [`Kind`] from their level, target and
//! fields; each sink then renders the kind in its own style. Messages never
//! carry escape codes, so the file needs no stripping.
use tracing::Level;

use super::types::{ModuleStatus, Outcome, STAGE, SUMMARY};

const RESET: &str = "\x1b[0m";

/// Fields of interest recorded from a [`tracing::Event`].
#[derive(Debug, Default)]
pub(super) struct EventFields {
    pub(super) message: String,
    pub(super) status: Option<String>,
}

impl tracing::field::Visit for EventFields {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "status" => self.status = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{value:?}"),
            "status" => self.status = Some(format!("{value:?}")),
            _ => {}
        }
    }
}

impl EventFields {
    /// Record the fields of `event`.
    pub(super) fn of(event: &tracing::Event<'_>) -> Self {
        let mut fields = Self::default();
        event.record(&mut fields);
        fields
    }
}

/// What an event means for the deployment output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Kind {
    Error,
    Warn,
    Stage,
    Step(Outcome),
    Summary(ModuleStatus),
    Info,
    Debug,
}

impl Kind {
    /// Classify an event.
    pub(super) fn classify(level: Level, target: &str, status: Option<&str>) -> Self {
        if level == Level::ERROR {
            return Self::Error;
        }
        if level == Level::WARN {
            return Self::Warn;
        }
        if target == STAGE {
            return Self::Stage;
        }
        if let Some(outcome) = Outcome::from_target(target) {
            return Self::Step(outcome);
        }
        if target == SUMMARY
            && let Some(status) = status.and_then(ModuleStatus::from_name)
        {
            return Self::Summary(status);
        }
        if level == Level::INFO {
            Self::Info
        } else {
            Self::Debug
        }
    }
}

/// Marker and colour of a step outcome on the console.
const fn step_style(outcome: Outcome) -> (&'static str, &'static str) {
    match outcome {
        Outcome::Applied => ("+", "\x1b[32m"),
        Outcome::AlreadyOk => ("=", "\x1b[2m"),
        Outcome::Skipped => ("-", "\x1b[33m"),
        Outcome::Planned => ("~", "\x1b[36m"),
    }
}

/// Icon and colour of a module summary line on the console.
const fn summary_style(status: ModuleStatus) -> (&'static str, &'static str) {
    match status {
        ModuleStatus::Ok => ("✓", "\x1b[32m"),
        ModuleStatus::DryRun => ("~", "\x1b[37m"),
        ModuleStatus::Failed => ("✗", "\x1b[31m"),
    }
}

/// Render `msg` for the terminal.
pub(super) fn console_line(kind: Kind, msg: &str) -> String {
    match kind {
        Kind::Error => format!("\x1b[31mERROR{RESET} {msg}"),
        Kind::Warn => format!("\x1b[33mWARN{RESET}  {msg}"),
        Kind::Stage => format!("\x1b[1;34m==>{RESET} \x1b[1m{msg}{RESET}"),
        Kind::Step(Outcome::Planned) => {
            let (marker, color) = step_style(Outcome::Planned);
            format!("  {color}{marker}{RESET} would {msg}")
        }
        Kind::Step(outcome) => {
            let (marker, color) = step_style(outcome);
            format!("  {color}{marker}{RESET} {msg}")
        }
        Kind::Summary(status) => {
            let (icon, color) = summary_style(status);
            format!("  {color}{icon} {msg}{RESET}")
        }
        Kind::Info => format!("  {msg}"),
        Kind::Debug => format!("  \x1b[2m{msg}{RESET}"),
    }
}

/// Render `msg` for the plain-text log file.
pub(super) fn file_line(kind: Kind, msg: &str) -> String {
    let tag = match kind {
        Kind::Stage => return format!("==> {msg}"),
        Kind::Info => return format!("    {msg}"),
        Kind::Step(Outcome::Planned) => return format!("    [planned] would {msg}"),
        Kind::Error => "error",
        Kind::Warn => "warn",
        Kind::Step(Outcome::Applied) => "applied",
        Kind::Step(Outcome::AlreadyOk) => "ok",
        Kind::Step(Outcome::Skipped) => "skipped",
        Kind::Summary(status) => status.as_str(),
        Kind::Debug => "debug",
    };
    format!("    [{tag}] {msg}")
}
