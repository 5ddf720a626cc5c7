//! Logging infrastructure for structured console and file output.

mod logger;
mod render;
mod subscriber;
mod types;

pub use logger::Logger;
pub use subscriber::init_subscriber;
pub use types::{Log, ModuleEntry, ModuleStatus, Outcome};
