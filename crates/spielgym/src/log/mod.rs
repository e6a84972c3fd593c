//! Episode metric reporting.
//!
//! Provides:
//! - `EpisodeLogger` trait for reporting backends
//! - `ConsoleLogger` for lightweight logging through `tracing`
//! - `NoOpLogger` to silence reporting

mod console;
mod logger;

pub use console::ConsoleLogger;
pub use logger::{EpisodeLogger, EpisodeSummary, NoOpLogger};
