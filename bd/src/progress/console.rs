//! Terminal presentation sink

use std::sync::atomic::{AtomicU8, Ordering};

use chrono::{SecondsFormat, Utc};
use colored::Colorize;
use tracing::debug;

use super::sink::{PresentationSink, clamp_ratio};

/// Progress is printed every this many percentage points
const PROGRESS_STEP_PCT: u8 = 10;

/// Writes timestamped lines to stdout
///
/// In quiet mode per-event `OK:`/`ERR:` lines are suppressed; everything else
/// is still printed.
pub struct ConsoleSink {
    quiet: bool,
    last_pct: AtomicU8,
}

impl ConsoleSink {
    pub fn new(quiet: bool) -> Self {
        debug!(quiet, "ConsoleSink::new: called");
        Self {
            quiet,
            last_pct: AtomicU8::new(0),
        }
    }

    fn is_event_line(message: &str) -> bool {
        message.starts_with("OK:") || message.starts_with("ERR:")
    }

    fn timestamp() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl PresentationSink for ConsoleSink {
    fn log(&self, message: &str) {
        if self.quiet && Self::is_event_line(message) {
            return;
        }

        let line = if message.starts_with("OK:") {
            message.green().to_string()
        } else if message.starts_with("ERR:") {
            message.red().to_string()
        } else {
            message.to_string()
        };
        println!("{}  {}", Self::timestamp().dimmed(), line);
    }

    fn set_progress(&self, ratio: f64) {
        let pct = (clamp_ratio(ratio) * 100.0).round() as u8;
        let last = self.last_pct.load(Ordering::SeqCst);

        // Only print on a step boundary or at completion, once per value
        if pct <= last || (pct < 100 && pct - last < PROGRESS_STEP_PCT) {
            return;
        }
        if self
            .last_pct
            .compare_exchange(last, pct, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            println!("{}  {}", Self::timestamp().dimmed(), format!("progress {:>3}%", pct).cyan());
        }
    }
}
