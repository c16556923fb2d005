//! Dispatcher - runs a burst from start to finish
//!
//! The dispatcher is responsible for:
//! - Validating the run configuration before any task starts
//! - Generating one payload per task via the EventFactory
//! - Submitting through the EventClient under the ConcurrencyGate
//! - Folding every outcome, success or failure, into the ResultAggregator
//! - Reporting progress once per settlement
//!
//! Lifecycle: `Idle -> Running -> Completed`. A completed dispatcher may run
//! another burst; a running one rejects a second `run`.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::aggregator::ResultAggregator;
use crate::client::EventClient;
use crate::domain::{DispatchState, RunConfig, RunResult, SubmissionOutcome};
use crate::error::BurstError;
use crate::factory::EventFactory;
use crate::gate::ConcurrencyGate;
use crate::progress::{PresentationSink, ProgressReporter, SinkReporter};

/// Orchestrates bursts against an EventClient
pub struct Dispatcher {
    client: Arc<dyn EventClient>,
    sink: Arc<dyn PresentationSink>,
    state: Mutex<DispatchState>,
}

/// Per-run collaborators shared by every task
struct RunContext<'a> {
    run_id: Uuid,
    total: usize,
    factory: &'a EventFactory,
    aggregator: &'a ResultAggregator,
    reporter: &'a dyn ProgressReporter,
    sink_progress: &'a SinkReporter,
}

impl Dispatcher {
    pub fn new(client: Arc<dyn EventClient>, sink: Arc<dyn PresentationSink>) -> Self {
        debug!("Dispatcher::new: called");
        Self {
            client,
            sink,
            state: Mutex::new(DispatchState::Idle),
        }
    }

    /// Current lifecycle state
    pub async fn state(&self) -> DispatchState {
        *self.state.lock().await
    }

    /// Run one burst to completion
    ///
    /// Fails only with a configuration error (before any submission) or when
    /// a burst is already running. Once tasks start, the call always returns
    /// a result with `finished == config.total`.
    pub async fn run(&self, config: &RunConfig, reporter: &dyn ProgressReporter) -> Result<RunResult, BurstError> {
        debug!(
            total = config.total,
            concurrency = config.concurrency,
            strategy = %config.strategy,
            "Dispatcher::run: called"
        );
        config.validate()?;
        let factory = EventFactory::new(config.tag_pool.as_slice())?;

        self.begin().await?;

        let run_id = Uuid::now_v7();
        let started = Instant::now();
        let total = config.total;
        info!(
            %run_id,
            total,
            concurrency = config.effective_concurrency(),
            strategy = %config.strategy,
            "Burst started"
        );

        let aggregator = ResultAggregator::new(total);
        let gate = ConcurrencyGate::new(config.strategy, config.concurrency);
        let sink_progress = SinkReporter::new(self.sink.clone());

        if total == 0 {
            debug!(%run_id, "Dispatcher::run: empty burst, completing immediately");
            reporter.report(0, 0);
            sink_progress.report(0, 0);
        } else {
            let ctx = RunContext {
                run_id,
                total,
                factory: &factory,
                aggregator: &aggregator,
                reporter,
                sink_progress: &sink_progress,
            };
            let ctx = &ctx;
            gate.drive(total, move |index| self.dispatch_one(ctx, index)).await;
        }

        let result = aggregator.snapshot().await;
        self.sink.log(&format!("Burst complete: sent {} events", result.finished));

        info!(
            %run_id,
            finished = result.finished,
            succeeded = result.succeeded(),
            failed = result.failed(),
            peak_in_flight = gate.stats().peak_in_flight,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Burst completed"
        );

        self.finish().await;
        Ok(result)
    }

    async fn begin(&self) -> Result<(), BurstError> {
        let mut state = self.state.lock().await;
        if *state == DispatchState::Running {
            debug!("Dispatcher::begin: already running, rejecting");
            return Err(BurstError::AlreadyRunning);
        }
        *state = DispatchState::Running;
        Ok(())
    }

    async fn finish(&self) {
        *self.state.lock().await = DispatchState::Completed;
    }

    /// Generate, submit and record a single task; never fails
    async fn dispatch_one(&self, ctx: &RunContext<'_>, index: usize) {
        let payload = ctx.factory.generate(&mut rand::rng());
        debug!(run_id = %ctx.run_id, index, event_type = %payload.event_type, "Dispatcher::dispatch_one: submitting");

        let outcome = match self.client.submit_event(&payload).await {
            Ok(event_id) => {
                self.sink.log(&format!("OK: {}", payload.to_log_string()));
                SubmissionOutcome::Success { event_id }
            }
            Err(e) => {
                warn!(run_id = %ctx.run_id, index, error = %e, "Event submission failed");
                self.sink.log(&format!("ERR: {}", e));
                SubmissionOutcome::Failure { reason: e.to_string() }
            }
        };

        ctx.aggregator
            .record_with(outcome, |finished| {
                ctx.reporter.report(finished, ctx.total);
                ctx.sink_progress.report(finished, ctx.total);
            })
            .await;
    }
}

/// Run a single burst with a fresh dispatcher
pub async fn run_burst(
    config: &RunConfig,
    client: Arc<dyn EventClient>,
    sink: Arc<dyn PresentationSink>,
    reporter: &dyn ProgressReporter,
) -> Result<RunResult, BurstError> {
    Dispatcher::new(client, sink).run(config, reporter).await
}
