//! ProgressReporter trait and adapters

use std::sync::Arc;

use super::sink::{PresentationSink, clamp_ratio};

/// Observer invoked once per settled task with `(completed, total)`
pub trait ProgressReporter: Send + Sync {
    fn report(&self, completed: usize, total: usize);
}

impl<F> ProgressReporter for F
where
    F: Fn(usize, usize) + Send + Sync,
{
    fn report(&self, completed: usize, total: usize) {
        self(completed, total)
    }
}

/// Forwards progress to a sink as a completion ratio
///
/// The dispatcher already drives its own sink through one of these, so pass
/// a `SinkReporter` to `run` only for a different sink.
pub struct SinkReporter {
    sink: Arc<dyn PresentationSink>,
}

impl SinkReporter {
    pub fn new(sink: Arc<dyn PresentationSink>) -> Self {
        Self { sink }
    }
}

impl ProgressReporter for SinkReporter {
    fn report(&self, completed: usize, total: usize) {
        let ratio = if total == 0 {
            1.0
        } else {
            completed as f64 / total as f64
        };
        self.sink.set_progress(clamp_ratio(ratio));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RatioSink {
        ratios: Mutex<Vec<f64>>,
    }

    impl PresentationSink for RatioSink {
        fn log(&self, _message: &str) {}

        fn set_progress(&self, ratio: f64) {
            self.ratios.lock().unwrap().push(ratio);
        }
    }

    #[test]
    fn test_closure_reporter() {
        let seen = Mutex::new(Vec::new());
        let reporter = |done: usize, total: usize| seen.lock().unwrap().push((done, total));

        reporter.report(1, 4);
        reporter.report(2, 4);

        assert_eq!(*seen.lock().unwrap(), vec![(1, 4), (2, 4)]);
    }

    #[test]
    fn test_sink_reporter_ratios() {
        let sink = Arc::new(RatioSink::default());
        let reporter = SinkReporter::new(sink.clone());

        reporter.report(1, 4);
        reporter.report(4, 4);
        reporter.report(0, 0);

        assert_eq!(*sink.ratios.lock().unwrap(), vec![0.25, 1.0, 1.0]);
    }
}
