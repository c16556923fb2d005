//! Domain types for BurstDispatch
//!
//! Core domain types: EventPayload, SubmissionOutcome, RunConfig, RunResult.
//! Payloads are created and discarded per task; outcomes are folded into the
//! run result as soon as they are produced.

mod event;
mod outcome;
mod run;

pub use event::{EventPayload, EventType};
pub use outcome::{RunResult, SubmissionOutcome};
pub use run::{DispatchState, RunConfig};
