//! Tracing subscriber setup: console formatter, log file layer, and
//! initialisation.
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::render::{EventFields, Kind, console_line, file_line};
use crate::context::home_dir;

/// Directory holding the run logs: `$XDG_CACHE_HOME/dotmodules`, falling back
/// to `~/.cache/dotmodules`. Created if missing.
fn log_dir() -> Option<PathBuf> {
    let cache = match std::env::var_os("XDG_CACHE_HOME") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => home_dir().ok()?.join(".cache"),
    };
    let dir = cache.join("dotmodules");
    fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Appends every event, timestamped and plain, to the log of one run.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Truncate the log at `path` and start it with a one-line run header.
    ///
    /// Returns `None` if the file cannot be written.
    pub(super) fn create(path: &Path) -> Option<Self> {
        let version = option_env!("DOTMODULES_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
        let mut file = fs::File::create(path).ok()?;
        writeln!(
            file,
            "# dotmodules {version}, started {} UTC",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S")
        )
        .ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let meta = event.metadata();
        let fields = EventFields::of(event);
        let kind = Kind::classify(*meta.level(), meta.target(), fields.status.as_deref());
        let ts = chrono::Utc::now().format("%H:%M:%S");

        if let Ok(mut file) = self.file.lock() {
            writeln!(file, "[{ts}] {}", file_line(kind, &fields.message)).ok();
        }
    }
}

/// Renders events on the terminal in the deployment output style.
struct ConsoleFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let fields = EventFields::of(event);
        let kind = Kind::classify(*meta.level(), meta.target(), fields.status.as_deref());
        writeln!(writer, "{}", console_line(kind, &fields.message))
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Warnings and errors go to stderr, everything else to stdout; debug lines
/// reach the console only when `verbose`. Every event, debug included, is
/// also written to `<log dir>/<command>.log`. Call once, before any logging.
///
/// Returns the log file path when the file could be created.
pub fn init_subscriber(verbose: bool, command: &str) -> Option<PathBuf> {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let console_layer = fmt::layer()
        .event_format(ConsoleFormatter)
        .with_writer(
            std::io::stderr
                .with_max_level(tracing::Level::WARN)
                .or_else(std::io::stdout),
        )
        .with_filter(console_level);

    let log_path = log_dir().map(|dir| dir.join(format!("{command}.log")));
    let file_layer = log_path.as_deref().and_then(FileLayer::create);
    let log_path = log_path.filter(|_| file_layer.is_some());

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer.map(|layer| layer.with_filter(LevelFilter::DEBUG)))
        .init();

    log_path
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::logging::{Logger, ModuleStatus, Outcome};
    use tracing_subscriber::layer::SubscriberExt as _;

    #[test]
    fn file_layer_records_outcomes_by_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deploy.log");
        let subscriber = tracing_subscriber::registry().with(FileLayer::create(&path).unwrap());

        let log = Logger::new(None);
        tracing::subscriber::with_default(subscriber, || {
            log.stage("Deploying Games");
            log.outcome(Outcome::Applied, "Copy a -> b");
            log.outcome(Outcome::AlreadyOk, "Make directory /home/user/bin");
            log.outcome(Outcome::Skipped, "Directory /home/user/c already exists");
            log.outcome(Outcome::Planned, "Symlink a -> b");
            log.debug("3 elements");
            log.record_module("Games", ModuleStatus::Ok, Some("1 changed"));
            log.print_summary();
        });

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# dotmodules "));
        assert!(content.contains("] ==> Deploying Games"));
        assert!(content.contains("[applied] Copy a -> b"));
        assert!(content.contains("[ok] Make directory /home/user/bin"));
        assert!(content.contains("[skipped] Directory /home/user/c already exists"));
        assert!(content.contains("[planned] would Symlink a -> b"));
        assert!(content.contains("[debug] 3 elements"));
        assert!(content.contains("[ok] Games (1 changed)"));
        assert!(!content.contains('\x1b'));
    }

    #[test]
    fn file_layer_fails_for_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("deploy.log");
        assert!(FileLayer::create(&path).is_none());
    }
}
