//! BurstDispatch - synthetic event burst generator
//!
//! BurstDispatch fabricates interaction events (likes, comments, shares) and
//! submits them to an event-ingestion endpoint with bounded parallelism,
//! tracking per-event outcomes and overall progress.
//!
//! # Core Concepts
//!
//! - **Bounded Concurrency**: In-flight submissions never exceed the configured limit
//! - **Failure Isolation**: A failed submission is recorded, never fatal to the burst
//! - **Ordered Progress**: Progress reports follow the monotonic completion counter
//!
//! # Modules
//!
//! - [`factory`] - Synthetic event payload generation
//! - [`gate`] - Concurrency gate with shared-queue and batch strategies
//! - [`aggregator`] - Thread-safe result accumulation
//! - [`progress`] - Progress reporters and presentation sinks
//! - [`client`] - EventClient trait and HTTP implementation
//! - [`dispatcher`] - Burst state machine tying it all together
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod aggregator;
pub mod cli;
pub mod client;
pub mod config;
pub mod dispatcher;
pub mod domain;
pub mod error;
pub mod factory;
pub mod gate;
pub mod progress;

// Re-export commonly used types
pub use aggregator::ResultAggregator;
pub use client::{EventClient, HttpEventClient, TransportError};
pub use config::{BurstConfig, ClientConfig, Config, StrategyKind};
pub use dispatcher::{Dispatcher, run_burst};
pub use domain::{DispatchState, EventPayload, EventType, RunConfig, RunResult, SubmissionOutcome};
pub use error::BurstError;
pub use factory::{EventFactory, normalize_tag};
pub use gate::{ConcurrencyGate, GateStats, GateStrategy};
pub use progress::{ConsoleSink, PresentationSink, ProgressReporter, SinkReporter};
