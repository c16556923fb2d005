//! PresentationSink trait definition

/// Fire-and-forget consumer of log lines and progress ratios
pub trait PresentationSink: Send + Sync {
    /// Append a human-readable line
    fn log(&self, message: &str);

    /// Update overall progress; `ratio` is in `[0, 1]`
    fn set_progress(&self, ratio: f64);
}

/// Clamp a ratio into `[0, 1]`, mapping NaN to 0
pub fn clamp_ratio(ratio: f64) -> f64 {
    if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) }
}
