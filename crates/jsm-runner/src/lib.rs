//! jsmin file runner: single files, bounded parallel directory runs and polling watch.

pub mod fs;
pub mod report;
pub mod runner;
pub mod watch;

pub use report::{Report, ReportFormat};
pub use runner::{options_from, BatchOutcome, Runner};
pub use watch::Watcher;
