//! ResultAggregator - accumulates settled submissions
//!
//! The completion counter and the id list are the only state mutated by
//! concurrent tasks, so both live behind one lock.

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::{RunResult, SubmissionOutcome};

/// Collects outcomes for a single burst of `total` tasks
pub struct ResultAggregator {
    total: usize,
    inner: Mutex<RunResult>,
}

impl ResultAggregator {
    pub fn new(total: usize) -> Self {
        debug!(total, "ResultAggregator::new: called");
        Self {
            total,
            inner: Mutex::new(RunResult::default()),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Fold one outcome into the result, returning the updated finished count
    pub async fn record(&self, outcome: SubmissionOutcome) -> usize {
        self.record_with(outcome, |_| {}).await
    }

    /// Fold one outcome and run `on_settled` with the new finished count
    ///
    /// `on_settled` runs while the lock is held, so callbacks observe
    /// finished counts in strictly increasing order. Outcomes past `total`
    /// are dropped and `on_settled` is not called for them.
    pub async fn record_with<F>(&self, outcome: SubmissionOutcome, on_settled: F) -> usize
    where
        F: FnOnce(usize),
    {
        let mut inner = self.inner.lock().await;

        if inner.finished >= self.total {
            warn!(total = self.total, ?outcome, "ResultAggregator::record_with: outcome past total, dropping");
            return inner.finished;
        }

        inner.finished += 1;
        match outcome {
            SubmissionOutcome::Success { event_id } => {
                debug!(%event_id, finished = inner.finished, "ResultAggregator::record_with: success");
                inner.event_ids.push(event_id);
            }
            SubmissionOutcome::Failure { reason } => {
                debug!(%reason, finished = inner.finished, "ResultAggregator::record_with: failure");
            }
        }

        let finished = inner.finished;
        on_settled(finished);
        finished
    }

    /// Copy of the result accumulated so far
    pub async fn snapshot(&self) -> RunResult {
        self.inner.lock().await.clone()
    }

    /// Whether every expected outcome has been recorded
    pub async fn is_complete(&self) -> bool {
        self.inner.lock().await.finished == self.total
    }
}
