//! Gate implementation

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures::future::join_all;
use tracing::debug;

use super::strategy::GateStrategy;

/// Diagnostics collected while driving tasks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateStats {
    /// Tasks started
    pub started: usize,

    /// Highest number of tasks in flight at once
    pub peak_in_flight: usize,
}

/// Runs `total` tasks with at most `concurrency` of them in flight
pub struct ConcurrencyGate {
    strategy: GateStrategy,
    concurrency: usize,
    in_flight: AtomicUsize,
    started: AtomicUsize,
    peak: AtomicUsize,
}

impl ConcurrencyGate {
    /// Create a gate; `concurrency` must be at least 1
    pub fn new(strategy: GateStrategy, concurrency: usize) -> Self {
        debug!(?strategy, concurrency, "ConcurrencyGate::new: called");
        Self {
            strategy,
            concurrency,
            in_flight: AtomicUsize::new(0),
            started: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    /// Bound used for a run of `total` tasks
    pub fn effective_limit(&self, total: usize) -> usize {
        self.concurrency.min(total)
    }

    /// Tasks currently in flight
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn stats(&self) -> GateStats {
        GateStats {
            started: self.started.load(Ordering::SeqCst),
            peak_in_flight: self.peak.load(Ordering::SeqCst),
        }
    }

    /// Drive task indices `0..total` through the gate
    ///
    /// `task` is invoked exactly once per index. Returns once every task has
    /// settled. Tasks must absorb their own failures.
    pub async fn drive<F, Fut>(&self, total: usize, task: F)
    where
        F: Fn(usize) -> Fut,
        Fut: Future<Output = ()>,
    {
        let limit = self.effective_limit(total);
        debug!(total, limit, strategy = %self.strategy, "ConcurrencyGate::drive: called");
        if limit == 0 {
            debug!("ConcurrencyGate::drive: nothing to run");
            return;
        }

        match self.strategy {
            GateStrategy::SharedQueue => {
                debug!("ConcurrencyGate::drive: shared-queue branch");
                self.drive_shared_queue(total, limit, &task).await;
            }
            GateStrategy::Batch { pause } => {
                debug!(?pause, "ConcurrencyGate::drive: batch branch");
                self.drive_batch(total, limit, pause, &task).await;
            }
        }

        debug!(stats = ?self.stats(), "ConcurrencyGate::drive: all tasks settled");
    }

    async fn drive_shared_queue<F, Fut>(&self, total: usize, limit: usize, task: &F)
    where
        F: Fn(usize) -> Fut,
        Fut: Future<Output = ()>,
    {
        let next = AtomicUsize::new(0);
        let next = &next;

        let workers = (0..limit).map(|worker| async move {
            loop {
                let index = next.fetch_add(1, Ordering::SeqCst);
                if index >= total {
                    debug!(worker, "ConcurrencyGate: worker drained queue");
                    break;
                }
                self.track(task(index)).await;
            }
        });

        join_all(workers).await;
    }

    async fn drive_batch<F, Fut>(&self, total: usize, limit: usize, pause: Duration, task: &F)
    where
        F: Fn(usize) -> Fut,
        Fut: Future<Output = ()>,
    {
        let mut start = 0;
        while start < total {
            let end = (start + limit).min(total);
            debug!(start, end, "ConcurrencyGate: starting batch");
            join_all((start..end).map(|index| self.track(task(index)))).await;
            start = end;

            if start < total && !pause.is_zero() {
                tokio::time::sleep(pause).await;
            }
        }
    }

    async fn track<Fut: Future<Output = ()>>(&self, fut: Fut) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.started.fetch_add(1, Ordering::SeqCst);
        self.peak.fetch_max(now, Ordering::SeqCst);
        fut.await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
