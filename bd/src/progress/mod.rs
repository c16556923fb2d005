//! Progress reporting for bursts
//!
//! Two seams: a [`ProgressReporter`] observes `(completed, total)` after each
//! settlement, and a [`PresentationSink`] receives log lines and progress
//! ratios for display.

mod console;
mod reporter;
mod sink;

pub use console::ConsoleSink;
pub use reporter::{ProgressReporter, SinkReporter};
pub use sink::{PresentationSink, clamp_ratio};
